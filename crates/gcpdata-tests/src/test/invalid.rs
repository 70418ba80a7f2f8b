use crate::prelude::*;

///
/// NonListAncestorsEntity
///

#[derive(Clone, Debug, Default, Persistent)]
pub struct NonListAncestorsEntity {
    #[persistent(id)]
    pub id: String,

    #[persistent(ancestors)]
    pub ancestors: String,
}

///
/// NonPairAncestorEntity
///

#[derive(Clone, Debug, Default, Persistent)]
pub struct NonPairAncestorEntity {
    #[persistent(id)]
    pub id: String,

    #[persistent(ancestors)]
    pub ancestors: Vec<String>,
}

///
/// EmbeddedReferenceAnnotatedEntity
///

#[derive(Clone, Debug, Default, Persistent)]
pub struct EmbeddedReferenceAnnotatedEntity {
    #[persistent(id)]
    pub id: String,

    #[persistent(embedded, reference)]
    pub sub_entity: Vec<String>,
}

///
/// NoIdEntity
///

#[derive(Clone, Debug, Default, Persistent)]
pub struct NoIdEntity {
    pub name: String,

    #[persistent(id, not_mapped)]
    pub shadow_id: String,
}

///
/// TwoIdEntity
///

#[derive(Clone, Debug, Default, Persistent)]
pub struct TwoIdEntity {
    #[persistent(id)]
    pub id: String,

    #[persistent(id)]
    pub other_id: String,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use gcpdata::core::error::{MappingError, MappingRule};

    fn rejected<T: Persistent>(context: &MappingContext) -> MappingError {
        context
            .persistent_entity::<T>()
            .expect_err("entity should be rejected")
    }

    #[test]
    fn ancestors_must_be_list_like() {
        let err = rejected::<NonListAncestorsEntity>(&MappingContext::new());

        assert_eq!(err.rule, MappingRule::AncestorsNotList);
        assert_eq!(err.field.as_deref(), Some("ancestors"));
    }

    #[test]
    fn ancestors_must_hold_pairs() {
        let err = rejected::<NonPairAncestorEntity>(&MappingContext::new());

        assert_eq!(err.rule, MappingRule::AncestorsNotPair);
        assert!(err.message.ends_with("got Text"), "message: {}", err.message);
    }

    #[test]
    fn embedded_and_reference_are_exclusive() {
        let err = rejected::<EmbeddedReferenceAnnotatedEntity>(&MappingContext::new());

        assert_eq!(err.rule, MappingRule::EmbeddedReference);
        assert_eq!(err.field.as_deref(), Some("sub_entity"));
        assert!(err.entity.ends_with("::EmbeddedReferenceAnnotatedEntity"));
    }

    #[test]
    fn excluded_id_marker_does_not_count() {
        let err = rejected::<NoIdEntity>(&MappingContext::new());

        assert_eq!(err.rule, MappingRule::MissingId);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = rejected::<TwoIdEntity>(&MappingContext::new());

        assert_eq!(err.rule, MappingRule::DuplicateId);
        assert!(!err.is_field_error());
    }

    #[test]
    fn rejection_is_cached_per_type() {
        let context = MappingContext::new();
        let first = rejected::<TwoIdEntity>(&context);
        let second = rejected::<TwoIdEntity>(&context);

        assert_eq!(first, second);
        assert!(context.is_registered(<TwoIdEntity as Persistent>::PATH));
        assert!(context.entities().is_empty(), "failed types are never listed");
    }
}

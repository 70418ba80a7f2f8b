use crate::prelude::*;

///
/// Counterparty
///

#[derive(Clone, Debug, Default)]
pub struct Counterparty {
    pub name: String,
    pub region: String,
}

///
/// ParentRef
///

#[derive(Clone, Debug, Default)]
pub struct ParentRef {
    pub kind: String,
    pub id: i64,
}

///
/// TestEntity
///

#[derive(Clone, Debug, Default, Persistent)]
#[persistent(kind = "custom_test_kind")]
pub struct TestEntity {
    #[persistent(id)]
    pub id: String,

    #[persistent(name = "custom_field")]
    pub something: i64,

    #[persistent(name = "")]
    pub other: String,

    pub double_list: Vec<f64>,

    #[persistent(ancestors)]
    pub ancestors: Vec<(String, i64)>,

    #[persistent(embedded)]
    pub counterparty: Counterparty,

    #[persistent(reference)]
    pub parent: Option<ParentRef>,

    #[persistent(not_mapped)]
    pub not_mapped: String,
}

///
/// UntypedListEntity
///

#[derive(Clone, Debug, Default, Persistent)]
pub struct UntypedListEntity<T> {
    #[persistent(id)]
    pub id: String,

    pub raw: Vec<T>,

    pub label: String,
}

///
/// OptionalListEntity
///

#[derive(Clone, Debug, Default, Persistent)]
pub struct OptionalListEntity<T> {
    #[persistent(id)]
    pub id: String,

    pub doubles: Option<Vec<f64>>,

    pub raw: Option<Vec<T>>,

    #[persistent(ancestors)]
    pub ancestors: Option<Vec<(String, i64)>>,
}

///
/// RenamedKindEntity
///

#[derive(Clone, Debug, Default, Persistent)]
#[persistent(kind = "")]
pub struct RenamedKindEntity {
    #[persistent(id)]
    pub id: u64,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use gcpdata::core::error::MappingRule;

    #[test]
    fn end_to_end_entity_maps_seven_properties() {
        let context = MappingContext::new();
        let entity = context
            .persistent_entity::<TestEntity>()
            .expect("test entity should map");

        let names: Vec<_> = entity.properties().map(PropertyDescriptor::mapped_name).collect();
        assert_eq!(
            names,
            vec![
                "id",
                "custom_field",
                "other",
                "double_list",
                "ancestors",
                "counterparty",
                "parent"
            ],
            "declaration order is kept and not_mapped is skipped"
        );
        assert_eq!(entity.kind_name(), "custom_test_kind");
        assert_eq!(entity.ident(), "TestEntity");
        assert!(entity.path().ends_with("::TestEntity"));
        assert_eq!(entity.id_property().field_name(), "id");
    }

    #[test]
    fn end_to_end_descriptor_shapes() {
        let context = MappingContext::new();
        let entity = context
            .persistent_entity::<TestEntity>()
            .expect("test entity should map");

        let renamed = entity.property("something").expect("renamed field");
        assert_eq!(renamed.mapped_name(), "custom_field");
        assert_eq!(
            renamed.declared_type(),
            &TypeShape::scalar(ScalarKind::Int64)
        );

        let other = entity.property("other").expect("empty rename field");
        assert_eq!(other.mapped_name(), "other", "empty override means no override");

        let doubles = entity.property("double_list").expect("list field");
        assert!(doubles.is_iterable());
        assert_eq!(
            doubles.iterable_inner_type().expect("typed list"),
            Some(&TypeShape::scalar(ScalarKind::Float64))
        );

        let ancestors = entity.property("ancestors").expect("ancestors field");
        assert!(ancestors.is_ancestors());
        assert!(!ancestors.is_embedded() && !ancestors.is_reference());

        let counterparty = entity.property("counterparty").expect("embedded field");
        assert!(counterparty.is_embedded());
        assert_eq!(counterparty.declared_type(), &TypeShape::named("Counterparty"));

        let parent = entity.property("parent").expect("reference field");
        assert!(parent.is_reference());
        assert!(!parent.is_embedded());
        assert!(parent.association().obverse.is_none());

        assert!(entity.property("not_mapped").is_none());
        assert!(entity.property_by_mapped_name("custom_field").is_some());
    }

    #[test]
    fn iteration_is_restartable_and_stable() {
        let context = MappingContext::new();
        let entity = context
            .persistent_entity::<TestEntity>()
            .expect("test entity should map");

        let first: Vec<_> = entity.properties().map(PropertyDescriptor::field_name).collect();
        let second: Vec<_> = (&*entity).into_iter().map(PropertyDescriptor::field_name).collect();

        let mut visited = Vec::new();
        entity.with_properties(|p| visited.push(p.field_name()));

        assert_eq!(first, second);
        assert_eq!(first, visited);
    }

    #[test]
    fn untyped_list_fails_only_on_inner_type_access() {
        let context = MappingContext::new();
        let entity = context
            .persistent_entity::<UntypedListEntity<String>>()
            .expect("untyped list does not fail registration");

        let raw = entity.property("raw").expect("raw field");
        assert!(raw.is_iterable());
        assert_eq!(raw.mapped_name(), "raw");
        assert_eq!(raw.declared_type(), &TypeShape::untyped_list());

        let err = raw
            .iterable_inner_type()
            .expect_err("untyped list has no inner type");
        assert_eq!(err.rule, MappingRule::UntypedIterable);
        assert_eq!(err.field.as_deref(), Some("raw"));
        assert!(err.entity.ends_with("::UntypedListEntity"));

        let label = entity.property("label").expect("label field");
        assert_eq!(label.iterable_inner_type(), Ok(None));
    }

    #[test]
    fn optional_lists_follow_iterable_rules() {
        let context = MappingContext::new();
        let entity = context
            .persistent_entity::<OptionalListEntity<u8>>()
            .expect("optional ancestors list should map");

        let ancestors = entity.property("ancestors").expect("ancestors field");
        assert!(ancestors.is_ancestors());

        let doubles = entity.property("doubles").expect("doubles field");
        assert!(doubles.is_iterable());
        assert_eq!(
            doubles.iterable_inner_type().expect("typed optional list"),
            Some(&TypeShape::scalar(ScalarKind::Float64))
        );

        let raw = entity.property("raw").expect("raw field");
        assert!(raw.is_iterable());
        let err = raw
            .iterable_inner_type()
            .expect_err("optional untyped list has no inner type");
        assert_eq!(err.rule, MappingRule::UntypedIterable);
        assert_eq!(err.field.as_deref(), Some("raw"));
    }

    #[test]
    fn empty_kind_falls_back_to_type_ident() {
        let context = MappingContext::new();
        let entity = context
            .persistent_entity::<RenamedKindEntity>()
            .expect("entity should map");

        assert_eq!(entity.kind_name(), "RenamedKindEntity");
        assert!(
            context.entity_by_kind("RenamedKindEntity").is_some(),
            "kind lookup should find the fallback name"
        );
    }

    #[test]
    fn snapshot_exports_mapped_names() {
        let context = MappingContext::new();
        let entity = context
            .persistent_entity::<TestEntity>()
            .expect("test entity should map");

        let json = serde_json::to_value(&*entity).expect("entity should serialize");

        assert_eq!(json["kind_name"], "custom_test_kind");
        assert_eq!(json["properties"][1]["mapped_name"], "custom_field");
        assert_eq!(json["properties"][0]["id"], true);
        assert!(
            json["properties"][1].get("id").is_none(),
            "false markers are omitted"
        );
    }
}

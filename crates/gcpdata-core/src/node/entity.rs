use crate::node::FieldDecl;
use serde::Serialize;

///
/// EntityDecl
///
/// Declared schema for one domain type: its path (type identity), an
/// optional kind-name override, and every declared field in order.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityDecl {
    pub path: &'static str,
    pub ident: &'static str,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,

    pub fields: Vec<FieldDecl>,
}

impl EntityDecl {
    /// Start a declaration; the ident is the last `::` segment of `path`.
    #[must_use]
    pub fn new(path: &'static str) -> Self {
        let ident = path.rsplit("::").next().unwrap_or(path);

        Self {
            path,
            ident,
            kind: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub const fn kind(mut self, kind: &'static str) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDecl>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Resolve the kind name used for storage identity.
    #[must_use]
    pub fn resolved_kind(&self) -> &'static str {
        self.kind.filter(|kind| !kind.is_empty()).unwrap_or(self.ident)
    }

    /// Look up a declared field by ident.
    #[must_use]
    pub fn get(&self, ident: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.ident == ident)
    }
}

use org_core::PersonRef;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PersonRefDto {
    pub id: String,
    pub name: String,
}

impl From<PersonRef> for PersonRefDto {
    fn from(p: PersonRef) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name,
        }
    }
}

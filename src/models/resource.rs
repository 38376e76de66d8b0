/// A verb a resource family exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// `GET /x`
    List,
    /// `GET /x/{id}`
    Get,
    /// `POST /x`
    Create,
    /// `PUT /x/{id}`, field-level set with upsert
    Update,
    /// `DELETE /x/{id}`
    Delete,
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    pub path: &'static str,
    pub collection: &'static str,
    pub capabilities: &'static [Capability],
}

impl ResourceSpec {
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn has_item_routes(&self) -> bool {
        [Capability::Get, Capability::Update, Capability::Delete]
            .iter()
            .any(|c| self.supports(*c))
    }
}

use Capability::*;

pub const RESOURCES: &[ResourceSpec] = &[
    ResourceSpec { path: "/course", collection: "course", capabilities: &[List, Get, Create, Update, Delete] },
    ResourceSpec { path: "/travel", collection: "travel", capabilities: &[List, Get, Create, Update, Delete] },
    ResourceSpec { path: "/blogs", collection: "blogs", capabilities: &[List, Get, Create, Delete] },
    ResourceSpec { path: "/blood", collection: "blood", capabilities: &[List, Get, Create, Update, Delete] },
    ResourceSpec { path: "/patient", collection: "patient", capabilities: &[List, Get, Create, Delete] },
    ResourceSpec { path: "/reviews", collection: "reviews", capabilities: &[List, Create] },
    ResourceSpec { path: "/userProfile", collection: "userProfile", capabilities: &[List, Get, Create, Update] },
];

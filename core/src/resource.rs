//! Resource descriptors: where an API resource lives and how each CRUD
//! operation addresses it.

/// Builds path fragments for the four CRUD operations on one resource.
///
/// The request URL is always `base_path()` followed by the fragment returned
/// for the operation. Returning `None` means this resource cannot address
/// that operation; the builder reports it as an invalid resource.
/// Descriptors are shared by reference across threads, hence `Send + Sync`.
pub trait Resource: Send + Sync {
    /// Base API path (or absolute URL) the fragments are appended to.
    fn base_path(&self) -> &str;

    fn create_path(&self) -> Option<String>;

    fn read_path(&self, id: &str) -> Option<String>;

    fn update_path(&self, id: &str) -> Option<String>;

    fn destroy_path(&self, id: &str) -> Option<String>;
}

/// Conventional collection resource: `/{collection}` for create and
/// `/{collection}/{id}` for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResource {
    base_path: String,
    collection: String,
    read_only: bool,
}

impl RestResource {
    pub fn new(base_path: &str, collection: &str) -> Self {
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
            collection: collection.trim_matches('/').to_string(),
            read_only: false,
        }
    }

    /// Refuse create, update and destroy.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn member_path(&self, id: &str) -> Option<String> {
        // An id with a slash would address a different resource.
        if id.contains('/') {
            return None;
        }
        Some(format!("/{}/{id}", self.collection))
    }

    fn writable(&self) -> Option<()> {
        (!self.read_only).then_some(())
    }
}

impl Resource for RestResource {
    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn create_path(&self) -> Option<String> {
        self.writable()?;
        Some(format!("/{}", self.collection))
    }

    fn read_path(&self, id: &str) -> Option<String> {
        self.member_path(id)
    }

    fn update_path(&self, id: &str) -> Option<String> {
        self.writable()?;
        self.member_path(id)
    }

    fn destroy_path(&self, id: &str) -> Option<String> {
        self.writable()?;
        self.member_path(id)
    }
}

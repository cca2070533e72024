use super::{EdgeId, VertexId};
use uuid::Uuid;

/// A deterministic ID generator that produces vertex and edge ids
/// based on a seed namespace and a counter.
///
/// The counter only ever grows, so an id is never issued twice by the same
/// generator, even after the entity it named has been removed.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    namespace: Uuid,
    counter: u64,
}

impl IdGenerator {
    /// Create a new generator from a string seed.
    /// The seed should be unique to the editing session (e.g. "Shape1").
    pub fn new(seed: &str) -> Self {
        Self::from_namespace(Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()))
    }

    /// Create a generator with a random namespace, for sessions that do not
    /// need reproducible ids.
    pub fn random() -> Self {
        Self::from_namespace(Uuid::new_v4())
    }

    fn from_namespace(namespace: Uuid) -> Self {
        Self { namespace, counter: 0 }
    }

    pub fn next_vertex_id(&mut self) -> VertexId {
        VertexId::from_uuid(self.next_uuid(b"vertex"))
    }

    pub fn next_edge_id(&mut self) -> EdgeId {
        EdgeId::from_uuid(self.next_uuid(b"edge"))
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }

    fn next_uuid(&mut self, kind: &[u8]) -> Uuid {
        let count = self.counter;
        self.counter += 1;
        let mut name = Vec::with_capacity(kind.len() + 8);
        name.extend_from_slice(kind);
        name.extend_from_slice(&count.to_be_bytes());
        Uuid::new_v5(&self.namespace, &name)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::random()
    }
}

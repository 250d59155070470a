pub mod in_memory;
pub mod supabase;
pub mod traits;

pub use in_memory::InMemoryDatastore;
pub use supabase::SupabaseStore;
pub use traits::Datastore;

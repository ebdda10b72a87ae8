//! Process-local in-memory store adapters.
//!
//! Both stores are flat `Vec`s behind a mutex: lookups are linear scans and
//! records live only as long as the process. Indexed maps can replace the
//! scans behind the same ports if the data ever outgrows this.

mod ticket_store;
mod user_store;

pub use self::ticket_store::InMemoryTicketStore;
pub use self::user_store::InMemoryUserStore;

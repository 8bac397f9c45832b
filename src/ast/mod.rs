pub mod ordering;
pub mod projections;
pub mod source;
pub mod stmt;
pub mod values;

pub use self::ordering::{Ordering, SortOrder};
pub use self::projections::Projection;
pub use self::source::{FromSource, Join, JoinTree, TableRef};
pub use self::stmt::{Core, LockHint, SelectStatement};
pub use self::values::Value;

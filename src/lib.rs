pub mod ast;
pub mod bind;
pub mod compiler;
pub mod error;
pub mod plan;
pub mod schema;

pub use compiler::{Compiler, CompilerConfig};

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::bind::{BindParameter, PreparedInvocation, bind};
    pub use crate::compiler::{Compiler, CompilerConfig};
    pub use crate::error::*;
    pub use crate::plan::unprepare;
    pub use crate::schema::{ColumnDef, Schema, TableDef};
}

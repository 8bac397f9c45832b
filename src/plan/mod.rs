//! Plan-inspection tooling: showplan options and invocation unpreparation.

mod unprepare;

pub use unprepare::unprepare;

use crate::error::{CompileError, CompileResult};

/// Which SHOWPLAN mode the execution layer should toggle around an EXPLAIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowplanOption {
    #[default]
    All,
    Text,
    Xml,
}

impl ShowplanOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowplanOption::All => "SHOWPLAN_ALL",
            ShowplanOption::Text => "SHOWPLAN_TEXT",
            ShowplanOption::Xml => "SHOWPLAN_XML",
        }
    }

    pub fn parse(name: &str) -> CompileResult<Self> {
        match name {
            "SHOWPLAN_ALL" => Ok(ShowplanOption::All),
            "SHOWPLAN_TEXT" => Ok(ShowplanOption::Text),
            "SHOWPLAN_XML" => Ok(ShowplanOption::Xml),
            other => Err(CompileError::UnknownShowplanOption(other.to_string())),
        }
    }

    /// `SET SHOWPLAN_* ON|OFF`.
    pub fn set_statement(&self, enable: bool) -> String {
        format!(
            "SET {} {}",
            self.as_str(),
            if enable { "ON" } else { "OFF" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_statement() {
        assert_eq!(ShowplanOption::All.set_statement(true), "SET SHOWPLAN_ALL ON");
        assert_eq!(ShowplanOption::Xml.set_statement(false), "SET SHOWPLAN_XML OFF");
    }

    #[test]
    fn test_parse_rejects_unknown_option() {
        assert!(ShowplanOption::parse("SHOWPLAN_TEXT").is_ok());
        assert!(matches!(
            ShowplanOption::parse("SHOWPLAN_YAML"),
            Err(CompileError::UnknownShowplanOption(_))
        ));
    }
}

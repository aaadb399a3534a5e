use crate::dispatch::CommandLine;

/// The odo subcommands whose output this crate knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdoCommand {
    /// `odo version`
    Version,
    /// `odo catalog list components`
    ListComponentCatalog,
    /// `odo catalog list services`
    ListServiceCatalog,
}

impl OdoCommand {
    pub fn args(self) -> &'static [&'static str] {
        match self {
            Self::Version => &["version"],
            Self::ListComponentCatalog => &["catalog", "list", "components"],
            Self::ListServiceCatalog => &["catalog", "list", "services"],
        }
    }

    pub fn to_command_line(self, program: &str) -> CommandLine {
        CommandLine::new(program).args(self.args().iter().copied())
    }
}

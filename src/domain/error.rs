use thiserror::Error;

/// Failure of the external listing command. Parsing never produces errors;
/// this is the only way a listing can abort.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("comando vazio")]
    EmptyCommand,

    #[error("não foi possível executar {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} retornou status {status:?}: {stderr}")]
    NonZeroExit {
        program: String,
        status: Option<i32>,
        stderr: String,
    },
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    ZDungeonError(#[from] zdungeon::client::error::Error),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
}

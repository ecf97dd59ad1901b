use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DigipetError {
    #[error("no pet with id {0}")]
    UnknownPet(Uuid),

    #[error("no pet id starts with {0:?}")]
    NoMatch(String),

    #[error("{0:?} matches more than one pet")]
    Ambiguous(String),
}

pub type Result<T> = std::result::Result<T, DigipetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_pet() {
        let id = Uuid::nil();
        assert_eq!(
            DigipetError::UnknownPet(id).to_string(),
            "no pet with id 00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            DigipetError::NoMatch("ab".into()).to_string(),
            "no pet id starts with \"ab\""
        );
    }
}

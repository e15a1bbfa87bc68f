//! Parsed call descriptors and their keyword arguments.

use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::InvocationError;

/// A parsed `/api/{target}/{method}?...` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    pub target: String,
    pub method: String,
    pub arguments: Arguments,
}

/// Keyword arguments of a call.
///
/// `None` (no query string) and `Keyword` are kept distinct: a method that
/// takes no arguments accepts only `None`. A `Keyword` map is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arguments {
    None,
    Keyword(IndexMap<String, String>),
}

impl Arguments {
    pub fn is_none(&self) -> bool {
        matches!(self, Arguments::None)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            Arguments::None => None,
            Arguments::Keyword(map) => map.get(name).map(String::as_str),
        }
    }

    /// Fails unless this is the no-arguments marker.
    pub fn expect_none(&self) -> Result<(), InvocationError> {
        match self {
            Arguments::None => Ok(()),
            Arguments::Keyword(map) => Err(InvocationError::UnexpectedArguments { count: map.len() }),
        }
    }

    /// Fails if any key is not in `accepted`.
    pub fn expect_only(&self, accepted: &[&str]) -> Result<(), InvocationError> {
        if let Arguments::Keyword(map) = self {
            if let Some(unknown) = map.keys().find(|k| !accepted.contains(&k.as_str())) {
                return Err(InvocationError::UnknownArgument(unknown.clone()));
            }
        }
        Ok(())
    }

    pub fn require(&self, name: &str) -> Result<&str, InvocationError> {
        self.get(name)
            .ok_or_else(|| InvocationError::MissingArgument(name.to_string()))
    }

    /// Parses an optional argument with `FromStr`.
    pub fn parse<T>(&self, name: &str) -> Result<Option<T>, InvocationError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| InvocationError::InvalidArgument {
                name: name.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(pairs: &[(&str, &str)]) -> Arguments {
        Arguments::Keyword(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn none_rejects_required() {
        let err = Arguments::None.require("name").unwrap_err();
        assert!(matches!(err, InvocationError::MissingArgument(n) if n == "name"));
    }

    #[test]
    fn keyword_rejected_by_expect_none() {
        let err = keyword(&[("a", "1")]).expect_none().unwrap_err();
        assert!(matches!(err, InvocationError::UnexpectedArguments { count: 1 }));
    }

    #[test]
    fn expect_only_names_first_unknown_key() {
        let args = keyword(&[("name", "x"), ("colour", "red")]);
        let err = args.expect_only(&["name", "cmd_port"]).unwrap_err();
        assert!(matches!(err, InvocationError::UnknownArgument(k) if k == "colour"));
        assert!(Arguments::None.expect_only(&[]).is_ok());
    }

    #[test]
    fn parse_interprets_string_values() {
        let args = keyword(&[("cmd_port", "2402"), ("bad", "x")]);
        assert_eq!(args.parse::<u16>("cmd_port").unwrap(), Some(2402));
        assert_eq!(args.parse::<u16>("absent").unwrap(), None);
        let err = args.parse::<u16>("bad").unwrap_err();
        assert!(err.to_string().contains("invalid value 'x' for argument 'bad'"));
    }
}

//! Token grammar for kubectl-style commands.
//!
//! ```text
//! <operator> <resource> [-n ns] [-o format] [--key=value]... [name]
//! run [-n ns] --image=<image> [--key=value]... <name>
//! ```

use crate::{
    alias,
    error::{Error, Result},
};

/// Structured parameters of a single command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParams {
    pub operator: String,
    /// Canonical resource kind, `None` only for `run`.
    pub resource: Option<String>,
    pub namespace: String,
    pub format: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub expose: Option<String>,
    pub port: Option<String>,
    pub target_port: Option<String>,
    pub node_port: Option<String>,
    pub service_type: Option<String>,
    /// Name of the object created by `expose` (`--name=`).
    pub inner_name: Option<String>,
}

impl CommandParams {
    fn new(operator: &str) -> Self {
        Self {
            operator: operator.to_string(),
            resource: None,
            namespace: String::from("default"),
            format: None,
            name: None,
            image: None,
            expose: None,
            port: None,
            target_port: None,
            node_port: None,
            service_type: None,
            inner_name: None,
        }
    }

    pub fn is_wide(&self) -> bool {
        self.format.as_deref() == Some("wide")
    }

    /// Checks if a listed object passes the optional name filter.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.as_deref().is_none_or(|wanted| wanted == name)
    }

    fn set_name(&mut self, token: &str) -> Result<()> {
        if let Some(name) = &self.name {
            return Err(Error::params(format!(
                "unexpected argument {token:?}, name already set to {name:?}"
            )));
        }
        self.name = Some(token.to_string());
        Ok(())
    }

    fn set_long_flag(&mut self, token: &str) -> Result<()> {
        let parts: Vec<&str> = token.split('=').collect();
        let &[key, value] = parts.as_slice() else {
            return Err(Error::params(format!("malformed flag {token:?}")));
        };
        let slot = match key.strip_prefix("--").unwrap_or(key) {
            "image" => &mut self.image,
            "expose" => &mut self.expose,
            "port" => &mut self.port,
            "target-port" => &mut self.target_port,
            "node-port" => &mut self.node_port,
            "type" => &mut self.service_type,
            "name" => &mut self.inner_name,
            _ => return Err(Error::params(format!("unknown flag {key:?}"))),
        };
        *slot = Some(value.to_string());
        Ok(())
    }
}

/// Parse a raw token list into [`CommandParams`].
///
/// Blank tokens are ignored. Repeated `-n`/`-o` overwrite earlier values and a
/// flag value is taken verbatim even when it looks like another flag.
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<CommandParams> {
    let tokens: Vec<&str> = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|token| !token.trim().is_empty())
        .collect();

    if tokens.len() < 2 {
        return Err(Error::params(format!(
            "expected at least 2 tokens, got {}",
            tokens.len()
        )));
    }

    let mut params = CommandParams::new(tokens[0]);
    let mut index = if params.operator == "run" {
        1
    } else {
        params.resource = Some(alias::resolve(tokens[1]));
        2
    };

    while index < tokens.len() {
        let token = tokens[index];
        match token {
            "-n" | "-o" => {
                let value = tokens
                    .get(index + 1)
                    .ok_or_else(|| Error::params(format!("flag {token} requires a value")))?;
                if token == "-n" {
                    params.namespace = value.to_string();
                } else {
                    params.format = Some(value.to_string());
                }
                index += 2;
                continue;
            }
            _ if token.starts_with("--") => params.set_long_flag(token)?,
            _ => params.set_name(token)?,
        }
        index += 1;
    }

    Ok(params)
}

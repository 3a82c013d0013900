#![cfg_attr(not(doctest), doc = include_str!("../README.md"))]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use k8s_openapi;
pub use kube;

pub mod alias;
pub use alias::{ResourceKind, resolve};
pub mod claputil;
pub use claputil::{command_value_completer, context_value_completer};
pub mod config;
pub use config::{connect, connect_from_str, determine_context, load_kubeconfig};
pub mod dispatch;
pub use dispatch::{execute, try_execute};
pub mod error;
pub use error::{
    CREATE_UNSUPPORTED, DELETE_UNSUPPORTED, EXPOSE_UNSUPPORTED, Error, NO_SUCH_COMMAND,
    PARAMS_ERROR, Result,
};
pub mod format;
pub mod handler;
pub mod log;
pub use log::{Logger, TracingLogger};
pub mod metrics;
pub mod params;
pub use params::{CommandParams, parse};
pub mod units;
pub use units::{ki_to_mi_or_gi, nc_to_mc};

const HELP: &str = include_str!("help.txt");

/// The packaged help document, returned verbatim for `help`.
pub fn help() -> &'static str {
    HELP
}

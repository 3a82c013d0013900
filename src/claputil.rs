use std::{collections::HashSet, ffi::OsStr};

use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use kube::config::Kubeconfig;

pub use clap_complete::engine;
pub use clap_complete::env::CompleteEnv;

use crate::{alias::ResourceKind, handler::Operator};

/// Create an `ArgValueCompleter` that lists contexts from the active kubeconfig.
///
/// The current context is listed first and marked `[current]`.
pub fn context_value_completer() -> ArgValueCompleter {
    ArgValueCompleter::new(|input: &OsStr| -> Vec<CompletionCandidate> {
        let kubeconfig = match Kubeconfig::read() {
            Ok(config) => config,
            Err(_) => return Vec::new(),
        };
        context_candidates(&kubeconfig, input.to_string_lossy().trim())
    })
}

fn context_candidates(kubeconfig: &Kubeconfig, prefix: &str) -> Vec<CompletionCandidate> {
    let current = kubeconfig.current_context.as_deref();
    let mut candidates: Vec<(bool, CompletionCandidate)> = kubeconfig
        .contexts
        .iter()
        .filter(|named| named.name.starts_with(prefix))
        .map(|named| {
            let is_current = current == Some(named.name.as_str());
            let candidate = CompletionCandidate::new(named.name.as_str());
            let candidate = if is_current {
                candidate.help(Some("[current]".into())).display_order(Some(0))
            } else {
                candidate
            };
            (is_current, candidate)
        })
        .collect();
    candidates.sort_by_key(|(is_current, _)| !is_current);
    candidates.into_iter().map(|(_, candidate)| candidate).collect()
}

/// Create an `ArgValueCompleter` for command words: operators and every resource alias.
///
/// Each resource alias carries its canonical kind as help text.
pub fn command_value_completer() -> ArgValueCompleter {
    ArgValueCompleter::new(|input: &OsStr| -> Vec<CompletionCandidate> {
        command_candidates(input.to_string_lossy().trim())
    })
}

fn command_candidates(prefix: &str) -> Vec<CompletionCandidate> {
    let operators = Operator::ALL
        .into_iter()
        .map(|operator| (operator.as_str(), None));
    let aliases = ResourceKind::ALL.into_iter().flat_map(|kind| {
        kind.aliases()
            .into_iter()
            .map(move |alias| (alias, Some(kind.canonical())))
    });

    let mut seen = HashSet::new();
    operators
        .chain(aliases)
        .chain([("help", None)])
        .filter(|(word, _)| word.starts_with(prefix))
        .filter(|(word, _)| seen.insert(*word))
        .map(|(word, kind)| {
            CompletionCandidate::new(word).help(kind.map(|kind| kind.into()))
        })
        .collect()
}

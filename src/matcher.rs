//! Pairing requests with responses.
//!
//! A request is answered by the first later fragment, of either direction,
//! that belongs to the same client. The pairing is positional and greedy:
//! one fragment can answer several earlier requests, and nothing is marked as
//! consumed. Requests with no later fragment for their client are reported as
//! unmatched and left out of the results.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, info};

use crate::capture::{Endpoint, Fragment, Operation};

/// A request for which no later fragment of the same client exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedInput {
    /// Index of the request in the fragment stream.
    pub position: usize,
    pub fragment: Fragment,
}

/// Operations in request order, plus the requests left without a partner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub operations: Vec<Operation>,
    pub unmatched: Vec<UnmatchedInput>,
}

impl MatchOutcome {
    fn record(&mut self, position: usize, request: &Fragment, response: Option<&Fragment>) {
        match response.and_then(|response| Operation::from_pair(request, response)) {
            Some(op) => self.operations.push(op),
            None => {
                info!(
                    line = request.line,
                    client = %request.client,
                    "no response found for request"
                );
                self.unmatched.push(UnmatchedInput {
                    position,
                    fragment: request.clone(),
                });
            }
        }
    }
}

/// Which matcher implementation to run.
///
/// Both produce identical output; `Indexed` avoids rescanning the stream
/// for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Forward scan from every request.
    Scan,
    /// Binary search over per-client positions.
    #[default]
    Indexed,
}

impl MatchStrategy {
    pub fn run(self, fragments: &[Fragment]) -> MatchOutcome {
        let outcome = match self {
            MatchStrategy::Scan => match_fragments(fragments),
            MatchStrategy::Indexed => match_fragments_indexed(fragments),
        };
        debug!(
            strategy = ?self,
            operations = outcome.operations.len(),
            unmatched = outcome.unmatched.len(),
            "fragments matched"
        );
        outcome
    }
}

fn requests(fragments: &[Fragment]) -> impl Iterator<Item = (usize, &Fragment)> {
    fragments.iter().enumerate().filter(|(_, f)| f.is_inbound())
}

/// Match every request by scanning forward through the rest of the stream.
pub fn match_fragments(fragments: &[Fragment]) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    for (i, request) in requests(fragments) {
        let response = fragments[i + 1..]
            .iter()
            .find(|candidate| candidate.client == request.client);
        outcome.record(i, request, response);
    }

    outcome
}

/// Same pairing as [`match_fragments`], using a per-client position index.
pub fn match_fragments_indexed(fragments: &[Fragment]) -> MatchOutcome {
    let mut positions: HashMap<&Endpoint, Vec<usize>> = HashMap::new();
    for (i, fragment) in fragments.iter().enumerate() {
        positions.entry(&fragment.client).or_default().push(i);
    }

    let mut outcome = MatchOutcome::default();

    for (i, request) in requests(fragments) {
        let response = positions.get(&request.client).and_then(|client_positions| {
            let next = client_positions.partition_point(|&pos| pos <= i);
            client_positions.get(next).map(|&pos| &fragments[pos])
        });
        outcome.record(i, request, response);
    }

    outcome
}

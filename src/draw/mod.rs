//! Derangement generator.
//!
//! Maps every participant to the person they buy a gift for, such that
//! nobody draws themselves and no excluded `(giver, recipient)` pair
//! appears. Valid assignments are chosen uniformly at random by rejection
//! sampling over Fisher-Yates shuffles, after an upfront matching check has
//! ruled out exclusion sets that admit no assignment at all.

pub mod feasibility;

use std::collections::{BTreeSet, HashMap};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::error::DrawError;

/// Default cap on rejected shuffles before a draw gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Directed `(giver, recipient)` pairs that must never be drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    pairs: BTreeSet<(String, String)>,
}

impl ExclusionSet {
    /// Creates an empty exclusion set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbids `giver` from drawing `recipient`.
    pub fn insert(&mut self, giver: impl Into<String>, recipient: impl Into<String>) {
        self.pairs.insert((giver.into(), recipient.into()));
    }

    /// Forbids `a` and `b` from drawing each other.
    pub fn insert_mutual(&mut self, a: impl Into<String>, b: impl Into<String>) {
        let (a, b) = (a.into(), b.into());
        self.pairs.insert((b.clone(), a.clone()));
        self.pairs.insert((a, b));
    }

    /// Returns `true` if `giver` may not draw `recipient`.
    #[must_use]
    pub fn forbids(&self, giver: &str, recipient: &str) -> bool {
        self.pairs.contains(&(giver.to_string(), recipient.to_string()))
    }

    /// Number of directed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(giver, recipient)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(g, r)| (g.as_str(), r.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(S, S)> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = (S, S)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (giver, recipient) in iter {
            set.insert(giver, recipient);
        }
        set
    }
}

/// One giver and the recipient they drew.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    /// Participant buying the gift.
    pub giver: String,
    /// Participant receiving the gift.
    pub recipient: String,
}

/// A complete draw: every participant gives exactly once and receives exactly once.
///
/// Pairings are kept in the order participants were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pairings: Vec<Pairing>,
}

impl Assignment {
    /// Returns the recipient drawn by `giver`, if `giver` took part.
    #[must_use]
    pub fn recipient_of(&self, giver: &str) -> Option<&str> {
        self.pairings.iter().find(|p| p.giver == giver).map(|p| p.recipient.as_str())
    }

    /// Iterates over pairings in participant order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pairing> {
        self.pairings.iter()
    }

    /// Number of pairings (equal to the number of participants).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    /// Returns `true` for an assignment over no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Pairing;
    type IntoIter = std::slice::Iter<'a, Pairing>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairings.iter()
    }
}

/// Draws assignments with a bounded number of rejected shuffles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawer {
    max_attempts: u32,
}

impl Default for Drawer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl Drawer {
    /// Creates a drawer that gives up after `max_attempts` rejected shuffles.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Returns the configured attempt cap.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draws a uniformly random valid assignment.
    ///
    /// The same `seed` always reproduces the same assignment for the same
    /// inputs. Without a seed a fresh one is chosen and logged at debug level.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidInput`] for an empty or single-member
    /// list, duplicate identifiers, or exclusions naming unknown identifiers.
    /// Returns [`DrawError::ConstraintUnsatisfiable`] when the exclusions
    /// leave no valid assignment or none turns up within the attempt cap.
    pub fn draw(
        &self,
        participants: &[String],
        exclusions: &ExclusionSet,
        seed: Option<u64>,
    ) -> Result<Assignment, DrawError> {
        let forbidden = forbidden_matrix(participants, exclusions)?;
        let n = participants.len();

        let seed = seed.unwrap_or_else(rand::random);
        debug!(seed, participants = n, exclusions = exclusions.len(), "drawing assignment");
        let mut rng = StdRng::seed_from_u64(seed);

        let mut order: Vec<usize> = (0..n).collect();
        for attempt in 1..=self.max_attempts {
            order.shuffle(&mut rng);
            if order.iter().enumerate().all(|(g, &r)| !forbidden[g][r]) {
                debug!(attempt, "accepted shuffle");
                let pairings = order
                    .iter()
                    .enumerate()
                    .map(|(g, &r)| Pairing {
                        giver: participants[g].clone(),
                        recipient: participants[r].clone(),
                    })
                    .collect();
                return Ok(Assignment { pairings });
            }
        }

        Err(DrawError::ConstraintUnsatisfiable { participants: n, attempts: self.max_attempts })
    }
}

/// Draws with the default attempt cap.
///
/// # Errors
///
/// See [`Drawer::draw`].
pub fn generate(
    participants: &[String],
    exclusions: &ExclusionSet,
    seed: Option<u64>,
) -> Result<Assignment, DrawError> {
    Drawer::default().draw(participants, exclusions, seed)
}

/// Checks that a draw over `participants` can succeed, without drawing.
///
/// # Errors
///
/// Returns [`DrawError::InvalidInput`] for malformed input and
/// [`DrawError::ConstraintUnsatisfiable`] when no valid assignment exists.
pub fn check_feasible(participants: &[String], exclusions: &ExclusionSet) -> Result<(), DrawError> {
    forbidden_matrix(participants, exclusions).map(|_| ())
}

/// `forbidden[g][r]` is set when giver `g` may not draw recipient `r`.
fn forbidden_matrix(
    participants: &[String],
    exclusions: &ExclusionSet,
) -> Result<Vec<Vec<bool>>, DrawError> {
    let index = check_input(participants, exclusions)?;
    let n = participants.len();
    let mut forbidden = vec![vec![false; n]; n];
    for (i, row) in forbidden.iter_mut().enumerate() {
        row[i] = true;
    }
    for (giver, recipient) in exclusions.iter() {
        forbidden[index[giver]][index[recipient]] = true;
    }

    if feasibility::has_perfect_matching(participants.len(), |g, r| !forbidden[g][r]) {
        Ok(forbidden)
    } else {
        Err(DrawError::ConstraintUnsatisfiable { participants: participants.len(), attempts: 0 })
    }
}

/// Validates the roster and returns each participant's position in it.
fn check_input<'a>(
    participants: &'a [String],
    exclusions: &ExclusionSet,
) -> Result<HashMap<&'a str, usize>, DrawError> {
    match participants.len() {
        0 => return Err(DrawError::InvalidInput("no participants".to_string())),
        1 => {
            return Err(DrawError::InvalidInput(format!(
                "a draw needs at least two participants, got only {}",
                participants[0]
            )))
        }
        _ => {}
    }

    let mut index = HashMap::with_capacity(participants.len());
    for (i, id) in participants.iter().enumerate() {
        if index.insert(id.as_str(), i).is_some() {
            return Err(DrawError::InvalidInput(format!("duplicate participant {id}")));
        }
    }

    for (giver, recipient) in exclusions.iter() {
        for id in [giver, recipient] {
            if !index.contains_key(id) {
                return Err(DrawError::InvalidInput(format!(
                    "exclusion {giver} -> {recipient} names unknown participant {id}"
                )));
            }
        }
    }

    Ok(index)
}

//! Validation of operator input
//!
//! Validation failures never reach the provider: they are reported and the
//! current step is re-prompted or abandoned.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use thiserror::Error;

use crate::resource::Classification;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid CIDR block '{input}': {reason}")]
    InvalidCidr { input: String, reason: String },

    #[error("Please enter a valid number greater than 0 (got '{0}')")]
    InvalidCount(String),

    #[error("Total count mismatch: {public} public + {private} private != {total} requested")]
    CountMismatch {
        total: usize,
        public: usize,
        private: usize,
    },

    #[error("Cannot create more than {max} subnets in one batch (got {requested})")]
    BatchTooLarge { requested: usize, max: usize },

    #[error("{0} cannot be empty")]
    Required(&'static str),
}

/// Largest subnet batch accepted; matches the default per-VPC subnet quota
pub const MAX_SUBNET_BATCH: usize = 200;

/// Parse an IPv4 network in CIDR notation.
///
/// The address must be the network address itself: `10.0.0.1/16` is
/// rejected because host bits are set.
pub fn parse_cidr(input: &str) -> Result<Ipv4Net, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidCidr {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (addr, prefix) = input
        .split_once('/')
        .ok_or_else(|| invalid("expected IP/prefix"))?;

    let addr: Ipv4Addr = addr
        .parse()
        .map_err(|_| invalid("address must be four octets 0-255"))?;

    // Reject forms like "/+8" and "/08" that u8 parsing would accept
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) || prefix.len() > 2 {
        return Err(invalid("prefix length must be a number 0-32"));
    }
    let prefix: u8 = prefix
        .parse()
        .map_err(|_| invalid("prefix length must be a number 0-32"))?;

    let net = Ipv4Net::new(addr, prefix).map_err(|_| invalid("prefix length must be 0-32"))?;
    if net.network() != addr {
        return Err(invalid("host bits are set"));
    }
    Ok(net)
}

/// True when `input` is a valid IPv4 network in CIDR notation
pub fn is_valid_cidr(input: &str) -> bool {
    parse_cidr(input).is_ok()
}

/// Parse a strictly positive count
pub fn parse_positive_count(input: &str) -> Result<usize, ValidationError> {
    let trimmed = input.trim();
    match parse_digits(trimmed) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::InvalidCount(trimmed.to_string())),
    }
}

/// Parse a count that may be zero
pub fn parse_count(input: &str) -> Result<usize, ValidationError> {
    let trimmed = input.trim();
    parse_digits(trimmed).ok_or_else(|| ValidationError::InvalidCount(trimmed.to_string()))
}

fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// How a subnet batch is split between public and private subnets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSplit {
    /// Exactly two subnets: one public, one private, no further questions
    Pair,
    /// Any other total: the operator supplies both counts
    Explicit { public: usize, private: usize },
}

/// Whether a batch of `total` subnets needs explicit public/private counts
pub fn needs_explicit_split(total: usize) -> bool {
    total != 2
}

/// Expand a batch into per-subnet classifications, public first.
///
/// Totals above `MAX_SUBNET_BATCH` are rejected before anything is allocated.
pub fn plan_subnet_batch(
    total: usize,
    split: BatchSplit,
) -> Result<Vec<Classification>, ValidationError> {
    if total > MAX_SUBNET_BATCH {
        return Err(ValidationError::BatchTooLarge {
            requested: total,
            max: MAX_SUBNET_BATCH,
        });
    }

    let (public, private) = match split {
        BatchSplit::Pair if total == 2 => (1, 1),
        BatchSplit::Pair => {
            return Err(ValidationError::CountMismatch {
                total,
                public: 1,
                private: 1,
            });
        }
        BatchSplit::Explicit { public, private } => (public, private),
    };

    if public.checked_add(private) != Some(total) {
        return Err(ValidationError::CountMismatch {
            total,
            public,
            private,
        });
    }

    let mut plan = vec![Classification::Public; public];
    plan.extend(std::iter::repeat_n(Classification::Private, private));
    Ok(plan)
}

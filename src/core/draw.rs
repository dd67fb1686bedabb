use crate::domain::model::{Assignment, Participant};
use crate::utils::error::{DrawError, Result};
use rand::Rng;

/// Attempt budget for rejection sampling. Empirically generous for the
/// session sizes this tool targets; callers may override it per run.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5000;

/// In-place Fisher–Yates shuffle. Walks `i` from the last index down to 1
/// and swaps with a uniform `j` in `[0, i]`, so every permutation of the
/// slice is equally likely. Keeps resampling unbiased across retries.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Checks the positional pairing `(givers[i], receivers[i])`: rejects any
/// self-assignment and any pair sharing an exclusion group. Short-circuits
/// on the first violation.
pub fn is_valid_pairing(givers: &[Participant], receivers: &[Participant]) -> bool {
    givers
        .iter()
        .zip(receivers)
        .all(|(giver, receiver)| giver.id != receiver.id && !giver.shares_group(receiver))
}

/// Produces a complete giver→receiver assignment set by rejection sampling:
/// shuffle a receiver candidate list until it pairs validly against the
/// fixed giver order, or the attempt budget runs out.
///
/// Fails with `InsufficientParticipants` below 2 participants and with
/// `AssignmentInfeasible` once `max_attempts` shuffles have been rejected.
/// Both failures are terminal for the run; nothing is retried internally
/// and no partial result escapes.
pub fn generate_assignments<R: Rng + ?Sized>(
    participants: &[Participant],
    max_attempts: u32,
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    if participants.len() < 2 {
        return Err(DrawError::InsufficientParticipants {
            count: participants.len(),
        });
    }

    let givers = participants;
    let mut receivers: Vec<Participant> = participants.to_vec();

    let mut attempts: u32 = 0;
    loop {
        shuffle(&mut receivers, rng);
        if is_valid_pairing(givers, &receivers) {
            break;
        }
        attempts += 1;
        if attempts >= max_attempts {
            return Err(DrawError::AssignmentInfeasible { attempts });
        }
    }

    Ok(givers
        .iter()
        .zip(&receivers)
        .map(|(giver, receiver)| Assignment::new(&giver.id, &receiver.id))
        .collect())
}

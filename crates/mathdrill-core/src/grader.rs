//! Deterministic grading.
//!
//! Ground truth is recomputed from the payload on every call. Fractions are
//! compared by cross-multiplication in `i128`, never by division.

use std::cmp::Ordering;

use crate::error::DrillError;
use crate::model::{FractionPayload, GcdPayload, GradeRequest, GradeResult, Payload};

/// Compare A/B against C/D via `A*D` vs `C*B`.
///
/// Matches the sign of `A/B - C/D` whenever both denominators are positive.
pub fn compare_fractions(p: &FractionPayload) -> Ordering {
    let lhs = p.a as i128 * p.d as i128;
    let rhs = p.c as i128 * p.b as i128;
    lhs.cmp(&rhs)
}

/// Relation symbol for an ordering of left against right.
pub fn relation_symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Greater => ">",
        Ordering::Less => "<",
        Ordering::Equal => "=",
    }
}

/// Euclid's algorithm on absolute values. `gcd(0, y) == |y|`.
pub fn gcd(x: i64, y: i64) -> u64 {
    let (mut a, mut b) = (x.unsigned_abs(), y.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Trim and fold full-width relation glyphs to ASCII.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '＞' => '>',
            '＜' => '<',
            '＝' => '=',
            other => other,
        })
        .collect()
}

/// The correct answer for a payload, as the string a caller must submit.
pub fn ground_truth(payload: &Payload) -> String {
    match payload {
        Payload::Fraction(p) => relation_symbol(compare_fractions(p)).to_string(),
        Payload::Gcd(p) => gcd(p.x, p.y).to_string(),
    }
}

/// Grade a decoded request.
///
/// Dispatches on the template; a payload of the other shape is rejected
/// rather than graded.
pub fn grade(request: &GradeRequest) -> Result<GradeResult, DrillError> {
    if request.payload.template() != request.template_id {
        return Err(DrillError::PayloadMismatch {
            template: request.template_id,
            reason: format!(
                "payload has the shape of {}",
                request.payload.template()
            ),
        });
    }

    let submitted = normalize_answer(&request.answer.as_text());
    let truth = ground_truth(&request.payload);
    let correct = submitted == truth;

    let feedback = match &request.payload {
        Payload::Fraction(p) => fraction_feedback(p, &truth, correct),
        Payload::Gcd(p) => gcd_feedback(p, &truth, correct),
    };

    tracing::debug!(
        template = %request.template_id,
        correct,
        "graded answer"
    );

    Ok(GradeResult {
        correct,
        ground_truth: truth,
        feedback,
    })
}

fn fraction_feedback(p: &FractionPayload, truth: &str, correct: bool) -> String {
    let statement = format!("{}/{} {truth} {}/{}", p.a, p.b, p.c, p.d);
    if correct {
        return format!("Correct! {statement}.");
    }
    let common = p.b as i128 * p.d as i128;
    let left = p.a as i128 * p.d as i128;
    let right = p.c as i128 * p.b as i128;
    format!(
        "Not quite. Over a common denominator, {}/{} = {left}/{common} and {}/{} = {right}/{common}, so {statement}.",
        p.a, p.b, p.c, p.d
    )
}

fn gcd_feedback(p: &GcdPayload, truth: &str, correct: bool) -> String {
    let prefix = if correct { "Correct!" } else { "Not quite." };
    format!(
        "{prefix} The greatest common divisor of {} and {} is {truth}.",
        p.x, p.y
    )
}

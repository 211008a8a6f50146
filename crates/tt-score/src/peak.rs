/// First local maximum in a confidence run.
///
/// First-peak-wins linear scan over the interior samples: index `i` is a
/// peak when `a[i-1] < a[i] > a[i+1]`. Endpoints can never be peaks, so
/// runs shorter than 3 have none.
///
/// # Example
/// ```
/// use tt_score::peak::first_peak;
/// assert_eq!(first_peak(&[0.1, 0.6, 0.2, 0.8, 0.3]), Some(1));
/// assert_eq!(first_peak(&[0.1, 0.2, 0.3]), None);
/// ```
#[must_use]
pub fn first_peak(chances: &[f32]) -> Option<usize> {
    (1..chances.len().saturating_sub(1))
        .find(|&i| chances[i - 1] < chances[i] && chances[i] > chances[i + 1])
}

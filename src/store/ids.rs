/// Issues time-based transaction ids that never repeat within a session.
///
/// Ids are decimal millisecond timestamps. When two ids are requested in the
/// same millisecond, or the clock steps backwards, the next id is the last
/// one plus one. Ids already present in loaded state are observed so new ids
/// always sort after them.
///
/// Once `i64::MAX` is reached, ids become `"<i64::MAX>-<n>"` with a growing
/// `n`, which loaded state also reports back through `observe`.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    last: i64,
    exhausted: u64,
}

impl IdGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Other non-numeric ids are ignored; they cannot collide with issued ones.
    pub(crate) fn observe(&mut self, id: &str) {
        if let Ok(n) = id.parse::<i64>() {
            self.last = self.last.max(n);
        } else if let Some(n) = exhausted_suffix(id) {
            self.last = i64::MAX;
            self.exhausted = self.exhausted.max(n);
        }
    }

    pub(crate) fn next(&mut self, now_millis: i64) -> String {
        match self.last.checked_add(1) {
            Some(bumped) => {
                let id = now_millis.max(bumped);
                self.last = id;
                id.to_string()
            }
            None => {
                self.exhausted = self.exhausted.saturating_add(1);
                format!("{}-{}", i64::MAX, self.exhausted)
            }
        }
    }
}

fn exhausted_suffix(id: &str) -> Option<u64> {
    let (head, tail) = id.split_once('-')?;
    if head.parse::<i64>().ok()? != i64::MAX {
        return None;
    }
    tail.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_clock_when_ahead() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(1_700_000_000_000), "1700000000000");
    }

    #[test]
    fn test_same_millisecond_bumps() {
        let mut ids = IdGenerator::new();
        let a = ids.next(1000);
        let b = ids.next(1000);
        let c = ids.next(999);
        assert_eq!(a, "1000");
        assert_eq!(b, "1001");
        assert_eq!(c, "1002");
    }

    #[test]
    fn test_observed_ids_are_skipped() {
        let mut ids = IdGenerator::new();
        ids.observe("5000");
        ids.observe("abc");
        ids.observe("12");
        assert_eq!(ids.next(10), "5001");
    }

    #[test]
    fn test_ids_stay_unique_past_i64_max() {
        let mut ids = IdGenerator::new();
        ids.observe(&i64::MAX.to_string());
        let a = ids.next(1000);
        let b = ids.next(i64::MAX);
        assert_eq!(a, "9223372036854775807-1");
        assert_eq!(b, "9223372036854775807-2");
    }

    #[test]
    fn test_observes_suffixed_ids() {
        let mut ids = IdGenerator::new();
        ids.observe("9223372036854775807-7");
        ids.observe("9223372036854775807-3");
        ids.observe("12-99");
        assert_eq!(ids.next(1000), "9223372036854775807-8");
    }
}

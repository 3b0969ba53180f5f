use std::collections::BTreeMap;

/// Named counters collected from the engine and the preprocessing pipeline.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    entries: BTreeMap<&'static str, u64>,
}

impl Statistics {
    /// Adds `value` to the counter `key`.
    pub fn update(&mut self, key: &'static str, value: u64) {
        *self.entries.entry(key).or_insert(0) += value;
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{key:<32} {value}")?;
        }
        Ok(())
    }
}

/*!
An iterator over the luby sequence, used to schedule restarts.

See <https://oeis.org/A182105> for details on the luby sequence.

The sequence is generated with the reluctant doubling trick: track a pair `(u, v)`, and step to `(u + 1, 1)` if `u & -u == v`, otherwise to `(u, 2v)`, with `v` the element of the sequence.
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// State of the iterator.
pub struct Luby {
    u: LubyRepresentation,
    v: LubyRepresentation,
}

// The default iterator sits on the first element of the sequence.
impl Default for Luby {
    fn default() -> Self {
        let mut luby = Luby { u: 0, v: 0 };
        luby.next();
        luby
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.u & self.u.wrapping_neg() == self.v {
            self.u = self.u.checked_add(1)?;
            self.v = 1;
        } else {
            self.v = self.v.checked_add(self.v)?;
        }

        Some(self.v)
    }
}

impl Luby {
    /// The current element of the sequence.
    pub fn current(&self) -> LubyRepresentation {
        self.v
    }

    /// The current element of the sequence scaled by `u`, saturating.
    pub fn scaled(&self, u: LubyRepresentation) -> usize {
        (self.v as usize).saturating_mul(u as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://oeis.org/A182105
    const LUBY_SLICE: &[LubyRepresentation] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
    ];

    #[test]
    fn luby() {
        let mut l = Luby { u: 0, v: 0 };
        for known_value in LUBY_SLICE {
            assert_eq!(l.next(), Some(*known_value))
        }
    }

    #[test]
    fn default_is_first() {
        let l = Luby::default();
        assert_eq!(l.current(), 1);
        assert_eq!(l.scaled(128), 128);
    }
}

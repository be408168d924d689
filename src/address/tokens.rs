use log::warn;

/// Address tokens keyed by their original position.
///
/// Claiming a token empties its slot instead of shifting the rest, so
/// positions stay the same for every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMap {
    slots: Vec<Option<String>>,
}

impl TokenMap {
    /// split on every single space, empty tokens included
    pub fn tokenize(raw: &str) -> Self {
        Self {
            slots: raw.split(' ').map(|token| Some(token.to_string())).collect(),
        }
    }

    /// number of positions in the original line
    pub fn positions(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.slots.get(position).and_then(|slot| slot.as_deref())
    }

    /// unclaimed tokens in ascending position order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &str)> {
        self.slots.iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_deref().map(|token| (position, token)))
    }

    /// claim the token at `position`; claiming twice only logs
    pub fn remove(&mut self, position: usize) -> Option<String> {
        let removed = self.slots.get_mut(position).and_then(Option::take);
        if removed.is_none() {
            warn!("token at position [{}] was already claimed or never existed: {:?}", position, self.slots);
        }
        removed
    }

    pub fn remove_all(&mut self, positions: impl IntoIterator<Item = usize>) {
        for position in positions {
            self.remove(position);
        }
    }

    /// join what nobody claimed back into a single line
    pub fn into_body(self) -> String {
        self.slots.into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

use crate::structs::PieceId;

#[inline(always)]
pub fn set_bit(bits: &mut [u64], index: usize) {
    bits[index >> 6] |= 1u64 << (index & 63);
}

/// Set of piece ids, one bit per id. Grows on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet {
    words: Vec<u64>,
}

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: PieceId) {
        let index = id as usize;
        let needed = (index >> 6) + 1;
        if self.words.len() < needed {
            self.words.resize(needed, 0);
        }
        set_bit(&mut self.words, index);
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros();
                rest &= rest - 1;
                Some((i as u32) * 64 + bit)
            })
        })
    }
}

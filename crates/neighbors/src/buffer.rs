//! Fixed-capacity ascending (distance, index) buffer.

/// Index stored in slots that have not been filled yet.
const SENTINEL: usize = usize::MAX;

/// Keeps the `k` smallest (distance, index) pairs seen so far, ascending.
///
/// Slots start at `+inf` with a sentinel index. Until the buffer is full every
/// candidate is kept, `+inf` included. Once full, an insert that does not
/// beat the current maximum is rejected with a single comparison; otherwise
/// the last slot is overwritten and bubbled backward into place. Equal
/// distances never swap, so among ties the pair inserted first keeps the
/// better slot.
///
/// # Example
///
/// ```
/// use vecchia_neighbors::BoundedSortedBuffer;
///
/// let mut buf = BoundedSortedBuffer::new(2);
/// buf.insert(4.0, 7);
/// buf.insert(1.0, 3);
/// buf.insert(9.0, 5); // rejected
/// assert_eq!(buf.indices().collect::<Vec<_>>(), vec![3, 7]);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedSortedBuffer {
    entries: Box<[(f64, usize)]>,
    len: usize,
}

impl BoundedSortedBuffer {
    /// Creates an empty buffer holding at most `capacity` pairs.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![(f64::INFINITY, SENTINEL); capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Maximum number of pairs kept.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true once every slot holds a real candidate.
    pub fn is_full(&self) -> bool {
        self.len == self.entries.len()
    }

    /// Current largest kept distance, `+inf` while the buffer is not full.
    ///
    /// A zero-capacity buffer reports `-inf` so that it rejects everything.
    #[inline]
    pub fn max(&self) -> f64 {
        self.entries.last().map_or(f64::NEG_INFINITY, |e| e.0)
    }

    /// Offers a candidate. Returns true if it was kept.
    #[inline]
    pub fn insert(&mut self, distance: f64, index: usize) -> bool {
        if distance.is_nan() {
            return false;
        }

        let mut j = if self.is_full() {
            if distance >= self.max() {
                return false;
            }
            self.entries.len() - 1
        } else {
            self.len += 1;
            self.len - 1
        };
        self.entries[j] = (distance, index);

        while j > 0 && self.entries[j].0 < self.entries[j - 1].0 {
            self.entries.swap(j, j - 1);
            j -= 1;
        }
        true
    }

    /// Filled pairs in ascending distance order.
    pub fn entries(&self) -> &[(f64, usize)] {
        &self.entries[..self.len]
    }

    /// Kept indices in ascending distance order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries().iter().map(|&(_, idx)| idx)
    }

    /// Kept distances in ascending order.
    pub fn distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries().iter().map(|&(d, _)| d)
    }
}

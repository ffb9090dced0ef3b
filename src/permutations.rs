//! Lazy enumeration of the orderings of a sequence.
//!
//! Depth first: the first slot takes each remaining item in turn, the rest
//! is permuted recursively. An item equal to the one just before it in the
//! remaining list is skipped for that slot, so runs of equal items are not
//! repeated.

struct Frame<T> {
    remaining: Vec<T>,
    next: usize,
}

pub struct Permutations<T, F> {
    stack: Vec<Frame<T>>,
    prefix: Vec<T>,
    same: F,
}

impl<T, F> Permutations<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    pub fn new(items: Vec<T>, same: F) -> Self {
        Self {
            stack: vec![Frame {
                remaining: items,
                next: 0,
            }],
            prefix: Vec::new(),
            same,
        }
    }
}

impl<T, F> Iterator for Permutations<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        loop {
            let frame = self.stack.last_mut()?;

            if frame.remaining.is_empty() {
                self.stack.pop();
                let out = self.prefix.clone();
                self.prefix.pop();
                return Some(out);
            }

            while frame.next > 0
                && frame.next < frame.remaining.len()
                && (self.same)(&frame.remaining[frame.next], &frame.remaining[frame.next - 1])
            {
                frame.next += 1;
            }

            if frame.next >= frame.remaining.len() {
                self.stack.pop();
                self.prefix.pop();
                continue;
            }

            let mut rest = frame.remaining.clone();
            let chosen = rest.remove(frame.next);
            frame.next += 1;
            self.prefix.push(chosen);
            self.stack.push(Frame {
                remaining: rest,
                next: 0,
            });
        }
    }
}

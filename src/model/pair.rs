/// Two mating partners.
///
/// Both elements may be the same individual (a "hermit" couple) when the
/// pool they were drawn from has a single member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair<T> {
    pub first: T,
    pub second: T,
}

impl<T> Pair<T> {
    pub fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    pub fn into_tuple(self) -> (T, T) {
        (self.first, self.second)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Pair<U> {
        Pair {
            first: f(self.first),
            second: f(self.second),
        }
    }
}

impl<T> From<(T, T)> for Pair<T> {
    fn from((first, second): (T, T)) -> Self {
        Self { first, second }
    }
}

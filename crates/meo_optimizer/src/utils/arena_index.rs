/// Stamps out a typed index into one of the graph's arenas. Ids are plain
/// positions in the owning vector, handed out once and never reused; edges
/// and paths reference each other through them instead of owning pointers,
/// so the back-links cannot dangle or cycle.
///
/// Indexing is implemented on both slices and `Vec`, since `Vec`'s own
/// `Index` impl requires `SliceIndex` and won't pick up a slice-only impl
/// through deref.
#[macro_export]
macro_rules! arena_index {
    ($name:ident => $t:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(usize);

        impl $name {
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::ops::Index<$name> for [$t] {
            type Output = $t;

            fn index(&self, index: $name) -> &$t {
                &self[index.0]
            }
        }

        impl std::ops::IndexMut<$name> for [$t] {
            fn index_mut(&mut self, index: $name) -> &mut $t {
                &mut self[index.0]
            }
        }

        impl std::ops::Index<$name> for Vec<$t> {
            type Output = $t;

            fn index(&self, index: $name) -> &$t {
                &self.as_slice()[index]
            }
        }

        impl std::ops::IndexMut<$name> for Vec<$t> {
            fn index_mut(&mut self, index: $name) -> &mut $t {
                &mut self.as_mut_slice()[index]
            }
        }
    };
}

//! Stack growth for recursive walks.
//!
//! Parse trees produced while the user is typing can nest arbitrarily deep
//! (a long chain of binary operators is one level per operand). Every
//! recursive walk over a tree or over the IR calls [`ensure_sufficient_stack`]
//! at each level so that such inputs grow the stack instead of aborting the
//! editor session.
//!
//! On wasm the guard is a plain call.

/// Grow once less than this much stack is left.
const MINIMUM_REMAINING_STACK: usize = 128 * 1024;

/// Size of each new stack segment.
const NEW_STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Runs `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(MINIMUM_REMAINING_STACK, NEW_STACK_SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Chain {
        Link(Box<Chain>),
        End,
    }

    fn build_chain(length: usize) -> Chain {
        let mut chain = Chain::End;
        for _ in 0..length {
            chain = Chain::Link(Box::new(chain));
        }
        chain
    }

    fn chain_length(chain: &Chain) -> usize {
        ensure_sufficient_stack(|| match chain {
            Chain::Link(next) => chain_length(next) + 1,
            Chain::End => 0,
        })
    }

    // Iterative drop; the default recursive one would overflow on its own.
    fn drop_chain(mut chain: Chain) {
        while let Chain::Link(next) = chain {
            chain = *next;
        }
    }

    #[test]
    fn test_walks_deeply_nested_chain() {
        let chain = build_chain(200_000);
        assert_eq!(chain_length(&chain), 200_000);
        drop_chain(chain);
    }

    #[test]
    fn test_passes_result_through() {
        let value: Result<&str, ()> = ensure_sufficient_stack(|| Ok("leaf"));
        assert_eq!(value, Ok("leaf"));
    }
}

//! In-place value exchange
//!
//! Two flavours of the same operation:
//!
//! - [`exchange`]: swap the values behind two exclusive references. The borrow
//!   checker guarantees both locations are valid and distinct, so there is no
//!   failure path.
//! - [`exchange_at`]: swap two slots of a slice addressed by index. Indices can
//!   alias and can be out of range, so this variant checks both. Exchanging a
//!   slot with itself leaves it untouched.
//!
//! Neither function allocates.

/// Exchange the values stored behind `first` and `second`.
///
/// After the call `*first` holds what `*second` held and vice versa.
///
/// ```
/// let mut a = 1337;
/// let mut b = 1338;
/// exchanger::exchange::exchange(&mut a, &mut b);
/// assert_eq!((a, b), (1338, 1337));
/// ```
#[inline]
pub fn exchange<T>(first: &mut T, second: &mut T) {
    std::mem::swap(first, second);
}

/// Exchange the slots at `first` and `second` inside `slots`.
///
/// Returns the first offending index if either is out of range; `slots` is not
/// modified in that case.
pub fn exchange_at<T>(slots: &mut [T], first: usize, second: usize) -> Result<(), usize> {
    let len = slots.len();
    if first >= len {
        return Err(first);
    }
    if second >= len {
        return Err(second);
    }
    if first == second {
        return Ok(());
    }

    // Split so both slots are borrowed mutably at once
    let (low, high) = if first < second {
        (first, second)
    } else {
        (second, first)
    };
    let (head, tail) = slots.split_at_mut(high);
    exchange(&mut head[low], &mut tail[0]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [i32; 7] = [i32::MIN, -1338, -1, 0, 1, 1337, i32::MAX];

    #[test]
    fn test_exchange_concrete_pair() {
        let mut a = 1337;
        let mut b = 1338;
        exchange(&mut a, &mut b);
        assert_eq!(a, 1338);
        assert_eq!(b, 1337);
    }

    #[test]
    fn test_exchange_all_sample_pairs() {
        for &x in &SAMPLES {
            for &y in &SAMPLES {
                let (mut a, mut b) = (x, y);
                exchange(&mut a, &mut b);
                assert_eq!((a, b), (y, x), "exchange({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_exchange_twice_restores() {
        for &x in &SAMPLES {
            let (mut a, mut b) = (x, x.wrapping_add(7));
            exchange(&mut a, &mut b);
            exchange(&mut a, &mut b);
            assert_eq!((a, b), (x, x.wrapping_add(7)));
        }
    }

    #[test]
    fn test_exchange_non_integer_types() {
        let mut first = String::from("left");
        let mut second = String::from("right");
        exchange(&mut first, &mut second);
        assert_eq!(first, "right");
        assert_eq!(second, "left");

        let mut p = (1u8, 'x');
        let mut q = (2u8, 'y');
        exchange(&mut p, &mut q);
        assert_eq!(p, (2, 'y'));
        assert_eq!(q, (1, 'x'));
    }

    #[test]
    fn test_exchange_at_both_orders() {
        let mut slots = [10, 20, 30, 40];
        exchange_at(&mut slots, 0, 3).unwrap();
        assert_eq!(slots, [40, 20, 30, 10]);
        exchange_at(&mut slots, 2, 1).unwrap();
        assert_eq!(slots, [40, 30, 20, 10]);
    }

    #[test]
    fn test_exchange_at_self_alias_is_noop() {
        let mut slots = [1337, 1338];
        exchange_at(&mut slots, 1, 1).unwrap();
        assert_eq!(slots, [1337, 1338]);
    }

    #[test]
    fn test_exchange_at_out_of_range() {
        let mut slots = [1, 2];
        assert_eq!(exchange_at(&mut slots, 0, 5), Err(5));
        assert_eq!(exchange_at(&mut slots, 9, 0), Err(9));
        assert_eq!(exchange_at(&mut slots, 2, 2), Err(2));
        assert_eq!(slots, [1, 2]);
    }
}

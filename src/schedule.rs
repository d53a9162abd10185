//! Resolution ordering for bodies that ride on other bodies.
//!
//! Bodies are independent except for passengers: a passenger inherits its
//! carrier's displacement, so the carrier must be resolved first within the
//! same tick.

use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Orders body indices so every carrier precedes its passengers.
///
/// `carriers[i]` names the index of the body that body `i` rides on, if any.
/// Bodies without a carrier keep their relative index order. Carrier indices
/// outside the slice are ignored, and a cycle of carriers is broken at the
/// body where the walk re-entered it; both cases are logged.
///
/// # Examples
/// ```
/// use tilehop::resolution_order;
/// // Body 0 rides on body 2, body 2 rides on body 1.
/// assert_eq!(resolution_order(&[Some(2), None, Some(1)]), vec![1, 2, 0]);
/// ```
#[must_use]
pub fn resolution_order(carriers: &[Option<usize>]) -> Vec<usize> {
    let mut marks = vec![Mark::Unvisited; carriers.len()];
    let mut order = Vec::with_capacity(carriers.len());
    let mut chain = Vec::new();

    for start in 0..carriers.len() {
        let mut current = Some(start);
        while let Some(index) = current {
            match marks.get(index).copied() {
                Some(Mark::Unvisited) => {}
                Some(Mark::OnPath) => {
                    warn!("carrier cycle through body {index}; resolving it without its carrier");
                    break;
                }
                Some(Mark::Done) => break,
                None => {
                    warn!("carrier index {index} is out of range; ignoring it");
                    break;
                }
            }
            if let Some(mark) = marks.get_mut(index) {
                *mark = Mark::OnPath;
            }
            chain.push(index);
            current = carriers.get(index).copied().flatten();
        }
        for index in chain.drain(..).rev() {
            if let Some(mark) = marks.get_mut(index) {
                *mark = Mark::Done;
            }
            order.push(index);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn position(order: &[usize], index: usize) -> usize {
        order
            .iter()
            .position(|&candidate| candidate == index)
            .expect("index scheduled")
    }

    #[rstest]
    #[case::independent(vec![None, None, None], vec![0, 1, 2])]
    #[case::passenger_first_in_input(vec![Some(1), None], vec![1, 0])]
    #[case::chain(vec![Some(1), Some(2), None], vec![2, 1, 0])]
    #[case::shared_carrier(vec![None, Some(0), Some(0)], vec![0, 1, 2])]
    #[case::empty(vec![], vec![])]
    fn orders_carriers_first(#[case] carriers: Vec<Option<usize>>, #[case] expected: Vec<usize>) {
        assert_eq!(resolution_order(&carriers), expected);
    }

    #[test]
    fn cycles_are_broken_deterministically() {
        let carriers = [Some(1), Some(0), None];
        let order = resolution_order(&carriers);
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn self_carrying_body_is_scheduled_once() {
        assert_eq!(resolution_order(&[Some(0)]), vec![0]);
    }

    #[test]
    fn out_of_range_carrier_is_ignored() {
        assert_eq!(resolution_order(&[Some(7), None]), vec![0, 1]);
    }

    #[test]
    fn every_carrier_precedes_its_passengers() {
        let carriers = [Some(3), None, Some(1), Some(2), Some(1)];
        let order = resolution_order(&carriers);
        assert_eq!(order.len(), carriers.len());
        for (passenger, carrier) in carriers.iter().enumerate() {
            if let Some(carrier) = carrier {
                assert!(position(&order, *carrier) < position(&order, passenger));
            }
        }
    }
}

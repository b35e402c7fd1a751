use crate::{
    clock::{remaining_wrapped, Minutes},
    order::{OrderRecord, OrderStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReport {
    InProgress {
        status: OrderStatus,
        remaining: Minutes,
    },
    Delivered {
        // True only for the query that flipped the order to delivered
        newly_delivered: bool,
    },
}

/// An order has arrived once the minutes elapsed since it was placed reach
/// its estimate. Both are measured forward on the 24 hour dial, so an order
/// placed at 23:50 for 00:20 is still on its way at 00:05.
pub fn has_arrived(order: &OrderRecord, now: Minutes) -> bool {
    remaining_wrapped(now, order.placed_at) >= order.estimated_minutes()
}

/// Answers "where is my order?" and commits the delivered state when due.
/// Needs exclusive access to the record since the answer may write it.
pub fn resolve(order: &mut OrderRecord, now: Minutes) -> StatusReport {
    if order.is_delivered() {
        return StatusReport::Delivered {
            newly_delivered: false,
        };
    }
    if has_arrived(order, now) {
        let newly_delivered = order.complete_delivery();
        return StatusReport::Delivered { newly_delivered };
    }
    StatusReport::InProgress {
        status: order.status(),
        remaining: remaining_wrapped(order.arrival, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{add_wrapped, to_minutes};

    fn order(placed_at: Minutes, minutes: Minutes) -> OrderRecord {
        OrderRecord::new(
            1,
            "홍길동",
            "봉명1동",
            "후라이드치킨",
            2,
            placed_at,
            add_wrapped(placed_at, minutes),
        )
    }

    #[test]
    fn test_cooking_then_delivered() {
        let mut o = order(to_minutes(19, 0), 15);
        assert_eq!(o.arrival, to_minutes(19, 15));
        assert_eq!(
            resolve(&mut o, to_minutes(19, 10)),
            StatusReport::InProgress {
                status: OrderStatus::Cooking,
                remaining: 5
            }
        );
        assert_eq!(o.status(), OrderStatus::Cooking);
        assert_eq!(
            resolve(&mut o, to_minutes(19, 20)),
            StatusReport::Delivered {
                newly_delivered: true
            }
        );
        assert!(o.is_delivered());
    }

    #[test]
    fn test_delivered_right_at_arrival() {
        let mut o = order(to_minutes(19, 0), 15);
        assert!(!has_arrived(&o, to_minutes(19, 14)));
        assert!(has_arrived(&o, to_minutes(19, 15)));
        assert!(matches!(
            resolve(&mut o, to_minutes(19, 15)),
            StatusReport::Delivered { .. }
        ));
    }

    #[test]
    fn test_delivered_is_sticky() {
        let mut o = order(to_minutes(19, 0), 15);
        resolve(&mut o, to_minutes(19, 30));
        for now in [to_minutes(19, 31), to_minutes(19, 5), to_minutes(3, 0)] {
            assert_eq!(
                resolve(&mut o, now),
                StatusReport::Delivered {
                    newly_delivered: false
                }
            );
            assert!(o.is_delivered());
            assert_eq!(o.arrival, to_minutes(19, 15));
            assert_eq!(o.quantity, 2);
        }
    }

    #[test]
    fn test_order_across_midnight() {
        let mut o = order(to_minutes(23, 50), 30);
        assert_eq!(o.arrival, to_minutes(0, 20));
        assert_eq!(
            resolve(&mut o, to_minutes(23, 55)),
            StatusReport::InProgress {
                status: OrderStatus::Cooking,
                remaining: 25
            }
        );
        assert_eq!(
            resolve(&mut o, to_minutes(0, 5)),
            StatusReport::InProgress {
                status: OrderStatus::Cooking,
                remaining: 15
            }
        );
        assert_eq!(
            resolve(&mut o, to_minutes(0, 20)),
            StatusReport::Delivered {
                newly_delivered: true
            }
        );
    }

    #[test]
    fn test_instant_order() {
        let mut o = order(to_minutes(12, 0), 0);
        assert!(matches!(
            resolve(&mut o, to_minutes(12, 0)),
            StatusReport::Delivered {
                newly_delivered: true
            }
        ));
    }
}

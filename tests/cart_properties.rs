//! Properties that hold for any sequence of cart operations.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use testresult::TestResult;

use cartage::prelude::*;

fn catalog() -> Inventory {
    [
        CatalogItem::new("tee", "Tee", "Cotton tee", dec!(18.00), 10),
        CatalogItem::new("hoodie", "Hoodie", "Zip hoodie", dec!(45.50), 10),
        CatalogItem::new("socks", "Socks", "Crew socks", dec!(9.99), 10),
    ]
    .into_iter()
    .collect()
}

fn sum_of_lines(cart: &Cart) -> Decimal {
    cart.items()
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity.get()))
        .sum()
}

#[test]
fn adding_then_removing_n_units_restores_cart() -> TestResult {
    let inventory = catalog();
    let hoodie = inventory.try_get("hoodie")?;
    let start = Cart::new("u").add_item(inventory.try_get("tee")?);

    for n in 1..=5 {
        let quantity = NonZeroU32::new(n).ok_or("zero quantity")?;
        let mut cart = start.add_items(hoodie, quantity);

        for _ in 0..n {
            cart = cart.remove_item(hoodie);
        }

        assert_eq!(cart, start, "cart not restored after {n} removals");
    }

    Ok(())
}

#[test]
fn subtotal_tracks_lines_through_any_sequence() -> TestResult {
    let inventory = catalog();
    let tee = inventory.try_get("tee")?;
    let hoodie = inventory.try_get("hoodie")?;
    let socks = inventory.try_get("socks")?;
    let three = NonZeroU32::new(3).ok_or("zero quantity")?;

    let steps: Vec<Box<dyn Fn(&Cart) -> Cart>> = vec![
        Box::new(|cart: &Cart| cart.add_item(tee)),
        Box::new(|cart: &Cart| cart.add_items(socks, three)),
        Box::new(|cart: &Cart| cart.add_item(tee)),
        Box::new(|cart: &Cart| cart.remove_item("socks")),
        Box::new(|cart: &Cart| cart.add_item_merged(hoodie, three)),
        Box::new(|cart: &Cart| cart.remove_item(tee)),
        Box::new(|cart: &Cart| cart.remove_item("missing")),
        Box::new(|cart: &Cart| cart.add_item_merged(hoodie, NonZeroU32::MIN)),
    ];

    let mut cart = Cart::new("u");

    for step in &steps {
        cart = step(&cart);

        assert_eq!(cart.sub_total(), sum_of_lines(&cart), "subtotal drifted");
    }

    assert_eq!(cart.sub_total(), dec!(201.98));

    Ok(())
}

#[test]
fn repeated_code_always_fails_second_time() -> TestResult {
    let inventory = catalog();
    let first = Cart::new("u").add_coupon(Coupon::new("SAVE").with_flat(dec!(1)))?;

    let after_changes = first
        .add_item(inventory.try_get("tee")?)
        .add_coupon(Coupon::new("OTHER"))?
        .set_shipping_cost(dec!(3))
        .remove_coupon_code("OTHER");

    let different_rule = Coupon::new("SAVE").with_percent(dec!(50));

    assert!(matches!(
        after_changes.add_coupon(different_rule),
        Err(CartError::DuplicateCoupon(code)) if code == "SAVE"
    ));

    Ok(())
}

#[test]
fn removing_absent_coupon_is_noop() -> TestResult {
    let cart = Cart::new("u").add_coupon(Coupon::new("KEEP"))?;

    assert_eq!(cart.remove_coupon(&Coupon::new("GONE")), cart);

    Ok(())
}

#[test]
fn removed_coupon_can_be_added_again() -> TestResult {
    let coupon = Coupon::new("AGAIN").with_flat(dec!(2));
    let cart = Cart::new("u")
        .add_coupon(coupon.clone())?
        .remove_coupon(&coupon)
        .add_coupon(coupon)?;

    assert_eq!(cart.coupons().len(), 1);

    Ok(())
}

#[test]
fn flat_plus_percent_never_beats_percent_alone() -> TestResult {
    let inventory = catalog();
    let cart = Cart::new("u")
        .add_item(inventory.try_get("hoodie")?)
        .add_item(inventory.try_get("socks")?);

    for flat in [dec!(0), dec!(0.01), dec!(5), dec!(55.49)] {
        for percent in [dec!(0), dec!(5), dec!(12.5), dec!(100)] {
            let percent_only = cart
                .add_coupon(Coupon::new("P").with_percent(percent))?
                .totals(Decimal::ZERO);
            let both = cart
                .add_coupon(Coupon::new("F").with_flat(flat))?
                .add_coupon(Coupon::new("P").with_percent(percent))?
                .totals(Decimal::ZERO);

            assert!(
                both.discounted_subtotal <= percent_only.discounted_subtotal,
                "flat {flat} + percent {percent} produced a higher subtotal"
            );
        }
    }

    Ok(())
}

#[test]
fn free_shipping_zeroes_any_shipping_cost() -> TestResult {
    let cart = Cart::new("u").add_coupon(Coupon::new("SHIP").with_free_shipping())?;

    for cost in [Decimal::ZERO, dec!(0.01), dec!(5.99), dec!(1000)] {
        let totals = cart.set_shipping_cost(cost).totals(dec!(0.2));

        assert_eq!(totals.shipping_charged, Decimal::ZERO, "charged for {cost}");
    }

    Ok(())
}

#[test]
fn operations_never_change_their_input() -> TestResult {
    let inventory = catalog();
    let cart = Cart::new("u").add_item(inventory.try_get("tee")?);
    let snapshot = cart.clone();

    let _changed = cart
        .add_item(inventory.try_get("socks")?)
        .remove_item("tee")
        .add_coupon(Coupon::new("C"))?
        .set_shipping_cost(dec!(1))
        .compute_total(dec!(0.1));

    assert_eq!(cart, snapshot);

    Ok(())
}

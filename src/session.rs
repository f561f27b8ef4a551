//! Session
//!
//! Holds the cart currently shown to a user. The session is owned by the
//! caller; cart operations never reach into it.

use tracing::debug;

use crate::{
    cart::Cart,
    store::{CartStore, StoreError},
};

/// Holder for the current cart, replaced wholesale on every change.
#[derive(Debug, Clone, Default)]
pub struct CartSession {
    current: Cart,
}

impl CartSession {
    /// Start a session with the given cart.
    pub fn new(cart: Cart) -> Self {
        Self { current: cart }
    }

    /// The current cart.
    pub fn current(&self) -> &Cart {
        &self.current
    }

    /// Replace the current cart, returning the previous one.
    pub fn replace(&mut self, cart: Cart) -> Cart {
        debug!(user_id = %cart.user_id(), lines = cart.len(), "replaced session cart");

        std::mem::replace(&mut self.current, cart)
    }

    /// Replace the current cart with the result of `f`.
    pub fn update(&mut self, f: impl FnOnce(&Cart) -> Cart) -> &Cart {
        let next = f(&self.current);
        self.replace(next);

        &self.current
    }

    /// Replace the current cart with the result of `f`, keeping it unchanged
    /// if `f` fails.
    ///
    /// # Errors
    ///
    /// Returns whatever error `f` returns.
    pub fn try_update<E>(
        &mut self,
        f: impl FnOnce(&Cart) -> Result<Cart, E>,
    ) -> Result<&Cart, E> {
        let next = f(&self.current)?;
        self.replace(next);

        Ok(&self.current)
    }

    /// Hand the current cart to `store`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot save the cart.
    pub fn commit(&self, store: &mut impl CartStore) -> Result<(), StoreError> {
        store.save(&self.current)
    }

    /// End the session, returning the current cart.
    pub fn into_cart(self) -> Cart {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;
    use crate::{
        cart::CartError,
        catalog::CatalogItem,
        coupons::Coupon,
        store::MemoryCartStore,
    };

    fn socks() -> CatalogItem {
        CatalogItem::new("socks-1", "Socks", "Plain white socks", dec!(4.50), 30)
    }

    #[test]
    fn default_session_holds_anonymous_empty_cart() {
        let session = CartSession::default();

        assert_eq!(session.current(), &Cart::new(""));
    }

    #[test]
    fn update_replaces_cart() {
        let mut session = CartSession::new(Cart::new("u"));

        session.update(|cart| cart.add_item(&socks()));

        assert_eq!(session.current().sub_total(), dec!(4.50));
    }

    #[test]
    fn replace_returns_previous_cart() {
        let mut session = CartSession::new(Cart::new("a"));

        let previous = session.replace(Cart::new("b"));

        assert_eq!(previous.user_id(), "a");
        assert_eq!(session.current().user_id(), "b");
    }

    #[test]
    fn failed_update_keeps_cart() -> TestResult {
        let mut session = CartSession::new(Cart::new("u"));
        session.try_update(|cart| cart.add_coupon(Coupon::new("X")))?;
        let before = session.current().clone();

        let result = session.try_update(|cart| cart.add_coupon(Coupon::new("X")));

        assert!(matches!(result, Err(CartError::DuplicateCoupon(_))));
        assert_eq!(session.current(), &before);

        Ok(())
    }

    #[test]
    fn commit_saves_current_cart() -> TestResult {
        let mut store = MemoryCartStore::new();
        let mut session = CartSession::new(Cart::new("u"));
        session.update(|cart| cart.add_item(&socks()));

        session.commit(&mut store)?;

        assert_eq!(store.load("u")?.as_ref(), Some(session.current()));

        Ok(())
    }
}

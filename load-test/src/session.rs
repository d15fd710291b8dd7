//! Per user state, stored in goose session data for the life of one virtual user.
use goose::goose::{GooseUser, GooseUserData};
use rand::{seq::SliceRandom, Rng};

use crate::{identity::Identity, ids::EntityId};

#[derive(Debug, Clone, Default, PartialEq)]
/// Product ids seen in the last listing that returned any
pub struct ProductCache {
    ids: Vec<EntityId>,
}

impl ProductCache {
    /// replaces the cache wholesale, an empty listing keeps what we had
    pub fn replace(&mut self, ids: Vec<EntityId>) -> bool {
        if ids.is_empty() {
            return false;
        }
        self.ids = ids;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[cfg(test)]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    /// picks one of the cached ids
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<EntityId> {
        self.ids.choose(rng).cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Ids an order must reference
pub struct OrderContext {
    pub user_id: EntityId,
    pub cart_id: EntityId,
}

#[derive(Debug, Clone)]
/// State of a full shopper
pub struct ShopperSession {
    pub identity: Identity,
    /// set after a successful registration
    pub user_id: Option<EntityId>,
    pub cart_id: Option<EntityId>,
    pub cart_open: bool,
    pub products: ProductCache,
}

impl ShopperSession {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            user_id: None,
            cart_id: None,
            cart_open: false,
            products: ProductCache::default(),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn registered(&mut self, user_id: EntityId) {
        self.user_id = Some(user_id);
    }

    pub fn cart_opened(&mut self, cart_id: EntityId) {
        self.cart_id = Some(cart_id);
        self.cart_open = true;
    }

    /// an order consumes the cart
    pub fn order_placed(&mut self) {
        self.cart_id = None;
        self.cart_open = false;
    }

    /// only a registered user with an open cart may order
    pub fn order_context(&self) -> Option<OrderContext> {
        if !self.cart_open {
            return None;
        }
        Some(OrderContext {
            user_id: self.user_id.clone()?,
            cart_id: self.cart_id.clone()?,
        })
    }
}

/// Returns the session data of type `T`, creating it with `init` the first time.
pub fn session_or_insert_with<T, F>(user: &mut GooseUser, init: F) -> &mut T
where
    T: GooseUserData,
    F: FnOnce() -> T,
{
    if user.get_session_data::<T>().is_none() {
        user.set_session_data(init());
    }
    user.get_session_data_unchecked_mut::<T>()
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::config::LoadTestConfig;

    #[test]
    fn empty_listing_keeps_cache() {
        let mut cache = ProductCache::default();
        assert!(cache.replace(vec![EntityId::Number(1), EntityId::Number(2)]));
        assert!(!cache.replace(vec![]));
        assert_eq!(cache.len(), 2);
        assert!(cache.replace(vec![EntityId::Number(3)]));
        assert!(!cache.contains(&EntityId::Number(1)));
    }

    #[test]
    fn choose_only_returns_cached_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cache = ProductCache::default();
        assert_eq!(cache.choose(&mut rng), None);
        cache.replace(vec![EntityId::Number(10), EntityId::Number(11)]);
        for _ in 0..50 {
            let id = cache.choose(&mut rng).unwrap();
            assert!(cache.contains(&id));
        }
    }

    #[test]
    fn order_needs_registration_and_open_cart() {
        let mut session = ShopperSession::new(Identity::generate(&LoadTestConfig::default()));
        assert_eq!(session.order_context(), None);

        // a cart without registration can't happen through the transactions, but must not order
        session.cart_opened(EntityId::Number(42));
        assert_eq!(session.order_context(), None);

        session.registered(EntityId::Number(7));
        assert_eq!(
            session.order_context(),
            Some(OrderContext {
                user_id: EntityId::Number(7),
                cart_id: EntityId::Number(42),
            })
        );

        session.order_placed();
        assert_eq!(session.order_context(), None);
        assert!(session.is_registered());
    }
}

//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use luxedrive_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator};
use luxedrive_core::config::AppConfig;
use luxedrive_core::traits::DeliveryQueue;
use luxedrive_database::DatabasePool;
use luxedrive_database::memory::{
    MemoryBookingStore, MemoryNotificationStore, MemoryUserStore, MemoryVehicleStore,
};
use luxedrive_database::repositories::{
    BookingRepository, NotificationRepository, UserRepository, VehicleRepository,
};
use luxedrive_database::stores::{BookingStore, NotificationStore, UserStore, VehicleStore};
use luxedrive_service::{
    AuthService, AvailabilityService, BookingService, NotificationDispatcher,
    NotificationService, UserService, VehicleService,
};

/// The four stores every service is built from.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub vehicles: Arc<dyn VehicleStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub notifications: Arc<dyn NotificationStore>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            vehicles: Arc::new(VehicleRepository::new(pool.clone())),
            bookings: Arc::new(BookingRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool)),
        }
    }

    /// Empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            vehicles: Arc::new(MemoryVehicleStore::new()),
            bookings: Arc::new(MemoryBookingStore::new()),
            notifications: Arc::new(MemoryNotificationStore::new()),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent when running on in-memory stores.
    pub db: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub vehicle_service: Arc<VehicleService>,
    pub availability_service: Arc<AvailabilityService>,
    pub booking_service: Arc<BookingService>,
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    /// Wire every service from the stores and the delivery queue.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        deliveries: Arc<dyn DeliveryQueue>,
        db: Option<DatabasePool>,
    ) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let dispatcher = Arc::new(NotificationDispatcher::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.notifications),
            deliveries,
            config.notifications.clone(),
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            password_hasher,
            password_validator,
            jwt_encoder,
            Arc::clone(&jwt_decoder),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.bookings),
        ));
        let vehicle_service = Arc::new(VehicleService::new(Arc::clone(&stores.vehicles)));
        let availability_service =
            Arc::new(AvailabilityService::new(Arc::clone(&stores.bookings)));
        let booking_service = Arc::new(BookingService::new(
            Arc::clone(&stores.bookings),
            Arc::clone(&stores.vehicles),
            dispatcher,
            &config.booking,
        ));
        let notification_service =
            Arc::new(NotificationService::new(Arc::clone(&stores.notifications)));

        Self {
            config: Arc::new(config),
            db,
            jwt_decoder,
            auth_service,
            user_service,
            vehicle_service,
            availability_service,
            booking_service,
            notification_service,
        }
    }
}

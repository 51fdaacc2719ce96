pub mod animals;
pub mod assets;
pub mod battery;
pub mod cache;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod grader;
pub mod history;
pub mod http;
pub mod item;
pub mod progress;
pub mod resolver;
pub mod selection;
pub mod session;
pub mod sources;
pub mod store;

pub use assets::{AssetHandle, AssetRegistry, BundledAssets};
pub use battery::{DigitSpanRun, NBackRun, ReactionRun, StroopRun};
pub use cache::{CacheNamespace, CachedImageEntry, ImageCache};
pub use catalog::Catalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CogError, CogResult};
pub use grader::is_match;
pub use history::{ResultsHistory, TestKind, TestResult};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use item::{CatalogItem, Category, Tier};
pub use progress::{ProgressRecord, ProgressStats, ProgressTracker};
pub use resolver::{
    ImageReference, ImageResolver, ImageSource, LoadEvent, LoadState, Resolution,
    ResolverSettings,
};
pub use selection::{recommended_config, Difficulty, SelectionPolicy, TestConfiguration, TestMode};
pub use session::{NamingSession, SessionEntry, SessionResult, Submission};
pub use store::{KvStore, MemoryKv};

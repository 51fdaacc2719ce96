use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to an image compiled into the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetHandle(pub String);

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait AssetRegistry: Send + Sync {
    fn lookup(&self, key: &str) -> Option<AssetHandle>;
}

const ASSET_DIR: &str = "assets/images/animals/core";

/// Keys of the images shipped with the application.
pub const BUNDLED_KEYS: &[&str] = &[
    "bear.jpg",
    "bird.jpg",
    "butterfly.jpg",
    "cat.jpg",
    "chicken.jpg",
    "cow.jpg",
    "deer.jpg",
    "dog.jpg",
    "dolphin.jpg",
    "duck.jpg",
    "eagle.jpg",
    "elephant.jpg",
    "fish.jpg",
    "frog.jpg",
    "giraffe.jpg",
    "hippo.jpg",
    "horse.jpg",
    "lion.jpg",
    "monkey.jpg",
    "mouse.jpg",
    "owl.jpg",
    "penguin.jpg",
    "pig.jpg",
    "rabbit.jpg",
    "rhino.jpg",
    "shark.jpg",
    "sheep.jpg",
    "spider.jpg",
    "tiger.jpg",
    "whale.jpg",
    "wolf.jpg",
    "zebra.jpg",
];

/// Registry over [`BUNDLED_KEYS`]; handles are paths relative to the app bundle.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledAssets;

impl AssetRegistry for BundledAssets {
    fn lookup(&self, key: &str) -> Option<AssetHandle> {
        BUNDLED_KEYS
            .contains(&key)
            .then(|| AssetHandle(format!("{ASSET_DIR}/{key}")))
    }
}

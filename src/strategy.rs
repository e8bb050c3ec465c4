use crate::batch::BatchSnapClient;
use crate::config::{ApiConfig, OsrmConfig, SnapConfig, StrategyKind};
use crate::coordinate::Coordinate;
use crate::error::SnapError;
use crate::osrm::OsrmClient;
use crate::per_point::PerPointSnapper;
use crate::traits::RoadSnapper;

/// The configured snapping capability.
#[derive(Debug, Clone)]
pub enum SnapStrategy {
    Batch(BatchSnapClient),
    PerPoint(PerPointSnapper<OsrmClient>),
}

impl SnapStrategy {
    pub fn from_config(
        api: &ApiConfig,
        osrm: &OsrmConfig,
        snap: &SnapConfig,
    ) -> Result<Self, reqwest::Error> {
        match snap.strategy {
            StrategyKind::Batch => Ok(SnapStrategy::Batch(BatchSnapClient::new(api, snap)?)),
            StrategyKind::PerPoint => {
                let client = OsrmClient::new(osrm.clone())?;
                Ok(SnapStrategy::PerPoint(PerPointSnapper::new(
                    client,
                    snap.on_point_failure,
                    snap.concurrency,
                )))
            }
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            SnapStrategy::Batch(_) => StrategyKind::Batch,
            SnapStrategy::PerPoint(_) => StrategyKind::PerPoint,
        }
    }
}

impl RoadSnapper for SnapStrategy {
    fn snap(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, SnapError> {
        match self {
            SnapStrategy::Batch(client) => client.snap(points),
            SnapStrategy::PerPoint(snapper) => snapper.snap(points),
        }
    }

    fn dedupes_server_side(&self) -> bool {
        match self {
            SnapStrategy::Batch(client) => client.dedupes_server_side(),
            SnapStrategy::PerPoint(snapper) => snapper.dedupes_server_side(),
        }
    }
}

// Re-export key components
pub use crate::fare::{
    AgeDiscountPolicy, DistanceSurchargePolicy, Fare, FareApplier, FareCalculator, FareConfig,
    FareContext, SurchargeKind,
};
pub use crate::loading::{NetworkConfig, load_network};
pub use crate::model::{Line, LineInfo, Section, Station};
pub use crate::routing::{
    CostMetric, Journey, Path, SubwayGraph, SubwayMap, find_path, path_exists,
};

// Core scalar types
pub use crate::Error;
pub use crate::{Age, Amount, Distance, Duration, LineId, StationId};

pub mod error;
pub mod rating;
pub mod table;
pub mod units;

pub use error::{Axis, IndexRangeError, PreservationError, Result};
pub use rating::{
    Concern, EnvironmentalRating, rate_mechanical_damage, rate_metal_corrosion,
    rate_mold_growth, rate_natural_aging,
};
pub use table::{BoundaryPolicy, LookupTable, round_half_up};
pub use units::{
    MoistureContent, MoldRisk, PreservationIndex, RH_MAX, RH_MIN, RelativeHumidity, TEMP_MAX,
    TEMP_MIN, Temperature,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outputs_carry_their_ratings() {
        assert_eq!(
            PreservationIndex(75).natural_aging(),
            EnvironmentalRating::Good
        );
        assert_eq!(
            MoistureContent(7.0).metal_corrosion(),
            EnvironmentalRating::Ok
        );
        assert_eq!(
            MoistureContent(4.9).mechanical_damage(),
            EnvironmentalRating::Risk
        );
        assert_eq!(MoldRisk::NONE.mold_growth(), EnvironmentalRating::Good);
    }

    #[test]
    fn table_serializes_by_rows() {
        let table = LookupTable::new(vec![1, 2, 3, 4], 0..=1, 5..=6, BoundaryPolicy::Raise)
            .expect("table");
        let json = serde_json::to_value(&table).expect("serialize table");
        assert_eq!(
            json,
            serde_json::json!({
                "temperature": [0, 1],
                "humidity": [5, 6],
                "policy": "raise",
                "rows": [[1, 2], [3, 4]],
            })
        );
        let round: LookupTable<i32> = serde_json::from_value(json).expect("deserialize table");
        assert_eq!(round, table);
    }
}

use uom::si::f64::ThermodynamicTemperature;

/// Known inlet and outlet temperatures of one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StreamTemperatures {
    /// Temperature entering the exchanger, if known.
    pub inlet: Option<ThermodynamicTemperature>,

    /// Temperature leaving the exchanger, if known.
    pub outlet: Option<ThermodynamicTemperature>,
}

impl StreamTemperatures {
    /// Neither temperature is known.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Only the inlet temperature is known.
    #[must_use]
    pub fn inlet(temperature: ThermodynamicTemperature) -> Self {
        Self {
            inlet: Some(temperature),
            outlet: None,
        }
    }

    /// Only the outlet temperature is known.
    #[must_use]
    pub fn outlet(temperature: ThermodynamicTemperature) -> Self {
        Self {
            inlet: None,
            outlet: Some(temperature),
        }
    }

    /// Both temperatures are known.
    #[must_use]
    pub fn both(inlet: ThermodynamicTemperature, outlet: ThermodynamicTemperature) -> Self {
        Self {
            inlet: Some(inlet),
            outlet: Some(outlet),
        }
    }
}

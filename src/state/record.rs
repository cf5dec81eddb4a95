//! Intake record domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The only product handled at this berth
pub const PRODUCT_NAME: &str = "Methanol";

/// Unit of measure for the loaded quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuantityUnit {
    #[default]
    #[serde(rename = "m3")]
    CubicMeters,
    #[serde(rename = "liters")]
    Liters,
    #[serde(rename = "gallons")]
    Gallons,
}

impl QuantityUnit {
    pub fn next(&self) -> Self {
        match self {
            Self::CubicMeters => Self::Liters,
            Self::Liters => Self::Gallons,
            Self::Gallons => Self::CubicMeters,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CubicMeters => "m³",
            Self::Liters => "Liters",
            Self::Gallons => "Gallons",
        }
    }
}

/// Pre-transfer safety checklist (ship/shore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SafetyChecklist {
    pub mooring_secured: bool,
    pub gangway_safe: bool,
    pub fire_equipment_ready: bool,
    pub emergency_shutdown_tested: bool,
    pub communications_established: bool,
    pub scuppers_plugged: bool,
    pub smoking_restrictions_enforced: bool,
    pub safety_data_sheet_available: bool,
    pub protective_equipment_worn: bool,
}

impl SafetyChecklist {
    pub const LEN: usize = 9;

    pub const LABELS: [&'static str; Self::LEN] = [
        "Mooring lines secured and tended",
        "Safe gangway access in place",
        "Fire-fighting equipment ready for immediate use",
        "Emergency shutdown procedure tested",
        "Ship/shore communications established",
        "Scuppers and drip trays plugged",
        "Smoking restrictions enforced",
        "Material safety data sheet available",
        "Required protective equipment worn",
    ];

    pub fn get(&self, index: usize) -> bool {
        match index {
            0 => self.mooring_secured,
            1 => self.gangway_safe,
            2 => self.fire_equipment_ready,
            3 => self.emergency_shutdown_tested,
            4 => self.communications_established,
            5 => self.scuppers_plugged,
            6 => self.smoking_restrictions_enforced,
            7 => self.safety_data_sheet_available,
            _ => self.protective_equipment_worn,
        }
    }

    pub fn toggle(&mut self, index: usize) {
        match index {
            0 => self.mooring_secured = !self.mooring_secured,
            1 => self.gangway_safe = !self.gangway_safe,
            2 => self.fire_equipment_ready = !self.fire_equipment_ready,
            3 => self.emergency_shutdown_tested = !self.emergency_shutdown_tested,
            4 => self.communications_established = !self.communications_established,
            5 => self.scuppers_plugged = !self.scuppers_plugged,
            6 => self.smoking_restrictions_enforced = !self.smoking_restrictions_enforced,
            7 => self.safety_data_sheet_available = !self.safety_data_sheet_available,
            _ => self.protective_equipment_worn = !self.protective_equipment_worn,
        }
    }

    pub fn all_checked(&self) -> bool {
        (0..Self::LEN).all(|i| self.get(i))
    }
}

/// Loading equipment verification checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentChecklist {
    pub loading_arm_inspected: bool,
    pub hoses_pressure_tested: bool,
    pub vapour_return_connected: bool,
    pub emergency_release_armed: bool,
    pub metering_verified: bool,
    pub bonding_cable_connected: bool,
}

impl EquipmentChecklist {
    pub const LEN: usize = 6;

    pub const LABELS: [&'static str; Self::LEN] = [
        "Loading arm inspected and leak-free",
        "Cargo hoses pressure tested and certified",
        "Vapour return line connected",
        "Emergency release coupling armed",
        "Custody metering system verified",
        "Ship/shore bonding cable connected",
    ];

    pub fn get(&self, index: usize) -> bool {
        match index {
            0 => self.loading_arm_inspected,
            1 => self.hoses_pressure_tested,
            2 => self.vapour_return_connected,
            3 => self.emergency_release_armed,
            4 => self.metering_verified,
            _ => self.bonding_cable_connected,
        }
    }

    pub fn toggle(&mut self, index: usize) {
        match index {
            0 => self.loading_arm_inspected = !self.loading_arm_inspected,
            1 => self.hoses_pressure_tested = !self.hoses_pressure_tested,
            2 => self.vapour_return_connected = !self.vapour_return_connected,
            3 => self.emergency_release_armed = !self.emergency_release_armed,
            4 => self.metering_verified = !self.metering_verified,
            _ => self.bonding_cable_connected = !self.bonding_cable_connected,
        }
    }

    pub fn all_checked(&self) -> bool {
        (0..Self::LEN).all(|i| self.get(i))
    }
}

/// The full vessel intake draft state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeRecord {
    // Identity
    pub vessel_name: String,
    pub vessel_id: String,
    pub imo_number: String,
    pub flag_state: String,
    pub vessel_type: String,

    // Schedule
    pub date_of_arrival: String,
    pub time_of_arrival: String,
    pub berth_assignment: String,
    pub estimated_departure: String,

    // Cargo (numeric values stay string-encoded until validated)
    pub quantity: String,
    pub quantity_unit: QuantityUnit,
    pub cargo_temperature: String,
    pub cargo_density: String,
    pub startup_load_rate: String,
    pub max_load_rate: String,
    pub max_pressure: String,

    pub safety_checks: SafetyChecklist,
    pub equipment_checks: EquipmentChecklist,

    // Signatures
    pub vessel_rep_name: String,
    pub vessel_rep_signature: String,
    pub terminal_rep_name: String,
    pub terminal_rep_signature: String,

    /// Stamped only on successful submission
    pub approval_date_time: Option<DateTime<Utc>>,
}

impl IntakeRecord {
    /// Display text for a field
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::VesselName => &self.vessel_name,
            Field::VesselId => &self.vessel_id,
            Field::ImoNumber => &self.imo_number,
            Field::FlagState => &self.flag_state,
            Field::VesselType => &self.vessel_type,
            Field::DateOfArrival => &self.date_of_arrival,
            Field::TimeOfArrival => &self.time_of_arrival,
            Field::BerthAssignment => &self.berth_assignment,
            Field::EstimatedDeparture => &self.estimated_departure,
            Field::Quantity => &self.quantity,
            Field::QuantityUnit => self.quantity_unit.label(),
            Field::CargoTemperature => &self.cargo_temperature,
            Field::CargoDensity => &self.cargo_density,
            Field::StartupLoadRate => &self.startup_load_rate,
            Field::MaxLoadRate => &self.max_load_rate,
            Field::MaxPressure => &self.max_pressure,
            Field::VesselRepName => &self.vessel_rep_name,
            Field::VesselRepSignature => &self.vessel_rep_signature,
            Field::TerminalRepName => &self.terminal_rep_name,
            Field::TerminalRepSignature => &self.terminal_rep_signature,
        }
    }

    /// Mutable text buffer for a field; `None` for the unit selector
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::VesselName => Some(&mut self.vessel_name),
            Field::VesselId => Some(&mut self.vessel_id),
            Field::ImoNumber => Some(&mut self.imo_number),
            Field::FlagState => Some(&mut self.flag_state),
            Field::VesselType => Some(&mut self.vessel_type),
            Field::DateOfArrival => Some(&mut self.date_of_arrival),
            Field::TimeOfArrival => Some(&mut self.time_of_arrival),
            Field::BerthAssignment => Some(&mut self.berth_assignment),
            Field::EstimatedDeparture => Some(&mut self.estimated_departure),
            Field::Quantity => Some(&mut self.quantity),
            Field::QuantityUnit => None,
            Field::CargoTemperature => Some(&mut self.cargo_temperature),
            Field::CargoDensity => Some(&mut self.cargo_density),
            Field::StartupLoadRate => Some(&mut self.startup_load_rate),
            Field::MaxLoadRate => Some(&mut self.max_load_rate),
            Field::MaxPressure => Some(&mut self.max_pressure),
            Field::VesselRepName => Some(&mut self.vessel_rep_name),
            Field::VesselRepSignature => Some(&mut self.vessel_rep_signature),
            Field::TerminalRepName => Some(&mut self.terminal_rep_name),
            Field::TerminalRepSignature => Some(&mut self.terminal_rep_signature),
        }
    }

    /// A field counts as empty when it holds only whitespace.
    /// The unit selector always carries a value.
    pub fn is_field_empty(&self, field: Field) -> bool {
        match field {
            Field::QuantityUnit => false,
            _ => self.text(field).trim().is_empty(),
        }
    }
}

/// One of the six fixed form sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    VesselInfo,
    Arrival,
    Cargo,
    Safety,
    Equipment,
    Signatures,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::VesselInfo,
        Section::Arrival,
        Section::Cargo,
        Section::Safety,
        Section::Equipment,
        Section::Signatures,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::VesselInfo => "Vessel Information",
            Self::Arrival => "Arrival & Berthing",
            Self::Cargo => "Cargo Parameters",
            Self::Safety => "Safety Checklist",
            Self::Equipment => "Equipment Verification",
            Self::Signatures => "Signatures",
        }
    }

    /// Editable fields owned by this section (checklist sections own none)
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::VesselInfo => &[
                Field::VesselName,
                Field::VesselId,
                Field::ImoNumber,
                Field::FlagState,
                Field::VesselType,
            ],
            Self::Arrival => &[
                Field::DateOfArrival,
                Field::TimeOfArrival,
                Field::BerthAssignment,
                Field::EstimatedDeparture,
            ],
            Self::Cargo => &[
                Field::Quantity,
                Field::QuantityUnit,
                Field::CargoTemperature,
                Field::CargoDensity,
                Field::StartupLoadRate,
                Field::MaxLoadRate,
                Field::MaxPressure,
            ],
            Self::Safety | Self::Equipment => &[],
            Self::Signatures => &[
                Field::VesselRepName,
                Field::VesselRepSignature,
                Field::TerminalRepName,
                Field::TerminalRepSignature,
            ],
        }
    }
}

/// Every editable field of the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    VesselName,
    VesselId,
    ImoNumber,
    FlagState,
    VesselType,
    DateOfArrival,
    TimeOfArrival,
    BerthAssignment,
    EstimatedDeparture,
    Quantity,
    QuantityUnit,
    CargoTemperature,
    CargoDensity,
    StartupLoadRate,
    MaxLoadRate,
    MaxPressure,
    VesselRepName,
    VesselRepSignature,
    TerminalRepName,
    TerminalRepSignature,
}

impl Field {
    pub const ALL: [Field; 20] = [
        Field::VesselName,
        Field::VesselId,
        Field::ImoNumber,
        Field::FlagState,
        Field::VesselType,
        Field::DateOfArrival,
        Field::TimeOfArrival,
        Field::BerthAssignment,
        Field::EstimatedDeparture,
        Field::Quantity,
        Field::QuantityUnit,
        Field::CargoTemperature,
        Field::CargoDensity,
        Field::StartupLoadRate,
        Field::MaxLoadRate,
        Field::MaxPressure,
        Field::VesselRepName,
        Field::VesselRepSignature,
        Field::TerminalRepName,
        Field::TerminalRepSignature,
    ];

    /// Wire key, matching the serialized record
    pub fn name(self) -> &'static str {
        match self {
            Self::VesselName => "vesselName",
            Self::VesselId => "vesselId",
            Self::ImoNumber => "imoNumber",
            Self::FlagState => "flagState",
            Self::VesselType => "vesselType",
            Self::DateOfArrival => "dateOfArrival",
            Self::TimeOfArrival => "timeOfArrival",
            Self::BerthAssignment => "berthAssignment",
            Self::EstimatedDeparture => "estimatedDeparture",
            Self::Quantity => "quantity",
            Self::QuantityUnit => "quantityUnit",
            Self::CargoTemperature => "cargoTemperature",
            Self::CargoDensity => "cargoDensity",
            Self::StartupLoadRate => "startupLoadRate",
            Self::MaxLoadRate => "maxLoadRate",
            Self::MaxPressure => "maxPressure",
            Self::VesselRepName => "vesselRepName",
            Self::VesselRepSignature => "vesselRepSignature",
            Self::TerminalRepName => "terminalRepName",
            Self::TerminalRepSignature => "terminalRepSignature",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VesselName => "Vessel Name",
            Self::VesselId => "Vessel ID",
            Self::ImoNumber => "IMO Number",
            Self::FlagState => "Flag State",
            Self::VesselType => "Vessel Type",
            Self::DateOfArrival => "Date of Arrival",
            Self::TimeOfArrival => "Time of Arrival",
            Self::BerthAssignment => "Berth Assignment",
            Self::EstimatedDeparture => "Estimated Departure",
            Self::Quantity => "Quantity",
            Self::QuantityUnit => "Unit",
            Self::CargoTemperature => "Cargo Temperature (°C)",
            Self::CargoDensity => "Cargo Density (kg/m³)",
            Self::StartupLoadRate => "Start-up Load Rate (m³/h)",
            Self::MaxLoadRate => "Max Load Rate (m³/h)",
            Self::MaxPressure => "Max Pressure (bar)",
            Self::VesselRepName => "Vessel Representative",
            Self::VesselRepSignature => "Vessel Rep. Signature",
            Self::TerminalRepName => "Terminal Representative",
            Self::TerminalRepSignature => "Terminal Rep. Signature",
        }
    }

    pub fn section(self) -> Section {
        match self {
            Self::VesselName
            | Self::VesselId
            | Self::ImoNumber
            | Self::FlagState
            | Self::VesselType => Section::VesselInfo,
            Self::DateOfArrival
            | Self::TimeOfArrival
            | Self::BerthAssignment
            | Self::EstimatedDeparture => Section::Arrival,
            Self::Quantity
            | Self::QuantityUnit
            | Self::CargoTemperature
            | Self::CargoDensity
            | Self::StartupLoadRate
            | Self::MaxLoadRate
            | Self::MaxPressure => Section::Cargo,
            Self::VesselRepName
            | Self::VesselRepSignature
            | Self::TerminalRepName
            | Self::TerminalRepSignature => Section::Signatures,
        }
    }
}

//! HL7 2.5 ADT field positions.
//!
//! Both the mappers (reading) and the generator (writing) use these indices, so a generated
//! message always re-parses to the same values. Indices follow HL7 numbering: `PID-3` is
//! field 3, and `MSH-n` is field n because the tokenizer keeps `MSH-1` in place.

/// `MSH` message header.
pub mod msh {
    pub const SENDING_APPLICATION: usize = 3;
    pub const SENDING_FACILITY: usize = 4;
    pub const RECEIVING_APPLICATION: usize = 5;
    pub const RECEIVING_FACILITY: usize = 6;
    pub const DATE_TIME: usize = 7;
    pub const MESSAGE_TYPE: usize = 9;
    pub const CONTROL_ID: usize = 10;
    pub const PROCESSING_ID: usize = 11;
    pub const VERSION_ID: usize = 12;
}

/// `PID` patient identification.
pub mod pid {
    pub const SET_ID: usize = 1;
    /// `id^check digit^scheme^assigning authority`; repeats.
    pub const IDENTIFIER_LIST: usize = 3;
    /// `family^given^middle^suffix^prefix`.
    pub const NAME: usize = 5;
    pub const BIRTH_DATE: usize = 7;
    pub const SEX: usize = 8;
}

/// `IN1` insurance.
pub mod in1 {
    pub const SET_ID: usize = 1;
    /// Insurance plan id, carried as the member id.
    pub const MEMBER_ID: usize = 2;
    pub const COMPANY_ID: usize = 3;
    pub const COMPANY_NAME: usize = 4;
    pub const GROUP_NUMBER: usize = 8;
    pub const PLAN_NAME: usize = 9;
}

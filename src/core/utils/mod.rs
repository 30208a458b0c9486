//=========================================================================
// Utilities
//=========================================================================
//
// Small helpers shared by the core subsystems.
//
//=========================================================================

//=== Module Declarations =================================================

mod named_enum;

//=== Public API ==========================================================

pub use named_enum::UnknownVariant;

mod label;
pub use label::LabelKind;

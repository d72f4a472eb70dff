//! Class label table for the nail-condition classifier.
//!
//! The table order matches the output vector of the pretrained artifact
//! exactly; index position N in the model output corresponds to
//! `CLASS_LABELS[N]`.

/// Total number of conditions the classifier distinguishes
pub const NUM_CLASSES: usize = 15;

/// Human-readable diagnosis names, in model output order
pub const CLASS_LABELS: [&str; NUM_CLASSES] = [
    "Dariers disease",
    "Muehrcke’s lines",
    "Alopecia areata",
    "Beau’s lines",
    "Bluish nail",
    "Clubbing, eczema, half-and-half nails (Lindsay’s nails)",
    "Koilonychia",
    "Leukonychia",
    "Onycholysis",
    "Pale nail",
    "Red lunula",
    "Splinter hemorrhage",
    "Terry’s nail",
    "White nail",
    "Yellow nails",
];

/// Get the diagnosis name for a given class index
pub fn class_label(index: usize) -> Option<&'static str> {
    CLASS_LABELS.get(index).copied()
}

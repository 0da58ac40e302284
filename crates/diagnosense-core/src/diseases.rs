pub mod chronic_kidney;
pub mod pneumonia;
pub mod prostate_cancer;

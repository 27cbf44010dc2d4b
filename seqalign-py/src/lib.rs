use pyo3::prelude::*;

mod align;

#[pymodule]
fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    align::register(m)?;
    Ok(())
}

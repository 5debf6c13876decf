pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

pub fn max_chars(limit: usize) -> Validator {
    Box::new(move |value: &str| {
        if value.chars().count() > limit {
            Err(format!("Maximum length is {limit}"))
        } else {
            Ok(())
        }
    })
}

pub fn custom<F>(f: F, message: impl Into<String>) -> Validator
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    let message = message.into();
    Box::new(move |value: &str| {
        if f(value) { Ok(()) } else { Err(message.clone()) }
    })
}

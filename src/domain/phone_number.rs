use validator::ValidationError;

#[derive(Debug, Clone)]
pub struct PhoneNumberDomain(pub String);

impl PhoneNumberDomain{
    // Numbers without a +country prefix are read as Indian numbers
    pub fn parse(number: String) -> Result<PhoneNumberDomain, String>{
        if phonenumber::parse(Some(phonenumber::country::IN), &number).is_ok(){
            Ok(Self(number))
        } else {
            Err(format!("{} is not a valid phone number", number))
        }
    }
}

pub fn validate_phone(number: &str) -> Result<(), ValidationError> {
    PhoneNumberDomain::parse(number.to_string())
        .map(|_| ())
        .map_err(|_| ValidationError::new("phone"))
}

use strum::{Display, EnumString, IntoStaticStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum Satellite {
    #[strum(serialize = "G16")]
    GOES16,
    #[strum(serialize = "G17")]
    GOES17,
    #[strum(serialize = "G18")]
    GOES18,
}

impl Satellite {
    /// The public NOAA Big Data bucket holding this satellite's data.
    pub fn bucket_name(&self) -> &'static str {
        match *self {
            Satellite::GOES16 => "noaa-goes16",
            Satellite::GOES17 => "noaa-goes17",
            Satellite::GOES18 => "noaa-goes18",
        }
    }
}

impl Default for Satellite {
    fn default() -> Self {
        Satellite::GOES16
    }
}

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// ABI products that are split by spectral band in the archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum Product {
    /// CONUS radiances, every 5 minutes (15 in mode 3).
    #[strum(serialize = "ABI-L1b-RadC")]
    RadC,
    /// Full disk radiances.
    #[strum(serialize = "ABI-L1b-RadF")]
    RadF,
    #[strum(serialize = "ABI-L2-CMIPC")]
    CmipC,
    #[strum(serialize = "ABI-L2-CMIPF")]
    CmipF,
}

impl Default for Product {
    fn default() -> Self {
        Product::RadC
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Band {
    C01,
    C02,
    C03,
    C04,
    C05,
    C06,
    C07,
    C08,
    C09,
    C10,
    C11,
    C12,
    C13,
    C14,
    C15,
    C16,
}

/// ABI scan mode, part of every file name (`-M3C01`, `-M6C13`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum ScanMode {
    M3,
    M4,
    M6,
}

impl Default for ScanMode {
    fn default() -> Self {
        ScanMode::M3
    }
}

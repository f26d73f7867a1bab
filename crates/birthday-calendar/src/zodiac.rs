use std::fmt;

/// 星座。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zodiac {
    Capricorn,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
}

/// 各月で次の星座に切り替わる日。
const CUSP_DAYS: [u32; 12] = [20, 19, 21, 20, 21, 22, 23, 23, 23, 24, 22, 22];

/// 1 月から順に、切り替え日より前の星座。
const SIGNS: [Zodiac; 13] = [
    Zodiac::Capricorn,
    Zodiac::Aquarius,
    Zodiac::Pisces,
    Zodiac::Aries,
    Zodiac::Taurus,
    Zodiac::Gemini,
    Zodiac::Cancer,
    Zodiac::Leo,
    Zodiac::Virgo,
    Zodiac::Libra,
    Zodiac::Scorpio,
    Zodiac::Sagittarius,
    Zodiac::Capricorn,
];

impl Zodiac {
    /// 公暦の月日から星座を求める。月が 1〜12 の範囲外なら `None`。
    pub fn from_month_day(month: u32, day: u32) -> Option<Self> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        let cusp = *CUSP_DAYS.get(index)?;
        if day < cusp {
            Some(SIGNS[index])
        } else {
            Some(SIGNS[index + 1])
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Zodiac::Capricorn => "摩羯座",
            Zodiac::Aquarius => "水瓶座",
            Zodiac::Pisces => "双鱼座",
            Zodiac::Aries => "白羊座",
            Zodiac::Taurus => "金牛座",
            Zodiac::Gemini => "双子座",
            Zodiac::Cancer => "巨蟹座",
            Zodiac::Leo => "狮子座",
            Zodiac::Virgo => "处女座",
            Zodiac::Libra => "天秤座",
            Zodiac::Scorpio => "天蝎座",
            Zodiac::Sagittarius => "射手座",
        }
    }
}

impl fmt::Display for Zodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

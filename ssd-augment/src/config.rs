//! Pipeline configuration format.

use crate::{
    common::*,
    imgproc::ColorSpace,
    processor::{
        Compose, ConvertColor, EvalTransformInit, ExpandInit, PhotometricDistortInit,
        RandomBrightnessInit, RandomContrastInit, RandomHueInit, RandomLightingNoiseInit,
        RandomMirrorInit, RandomSaturationInit, RandomSampleCropInit, ResizeInit,
        SubtractMeansInit, SwapChannels, ToAbsoluteCoords, ToPercentCoords,
        TrainAugmentationInit, Transform,
    },
};

/// The main augmentation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub pipeline: PipelineConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = Self::from_json5(&text)
            .with_context(|| format!("unable to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json5(text: &str) -> Result<Self> {
        let config = json5::from_str(text)?;
        Ok(config)
    }

    /// Instantiate the configured pipeline.
    pub fn build(&self) -> Result<Compose> {
        self.pipeline.clone().build()
    }
}

/// The pipeline, either a preset or an explicit list of transforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PipelineConfig {
    Train(TrainAugmentationInit),
    Eval(EvalTransformInit),
    Custom { transforms: Vec<TransformConfig> },
}

impl PipelineConfig {
    pub fn build(self) -> Result<Compose> {
        let pipeline = match self {
            Self::Train(init) => init.build()?,
            Self::Eval(init) => init.build()?,
            Self::Custom { transforms } => {
                if transforms.is_empty() {
                    warn!("the configured pipeline has no transforms");
                }
                transforms
                    .into_iter()
                    .enumerate()
                    .map(|(index, config)| {
                        config
                            .build()
                            .with_context(|| format!("invalid transform at index {}", index))
                    })
                    .collect::<Result<Compose>>()?
            }
        };
        debug!("pipeline built with {} steps", pipeline.len());
        Ok(pipeline)
    }
}

/// One transform of a custom pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransformConfig {
    ToAbsoluteCoords,
    ToPercentCoords,
    Resize(ResizeInit),
    SubtractMeans(SubtractMeansInit),
    Expand(ExpandInit),
    RandomMirror(RandomMirrorInit),
    RandomSampleCrop(RandomSampleCropInit),
    RandomContrast(RandomContrastInit),
    RandomBrightness(RandomBrightnessInit),
    RandomSaturation(RandomSaturationInit),
    RandomHue(RandomHueInit),
    RandomLightingNoise(RandomLightingNoiseInit),
    PhotometricDistort(PhotometricDistortInit),
    SwapChannels { order: [usize; 3] },
    ConvertColor { from: ColorSpace, to: ColorSpace },
    Compose { transforms: Vec<TransformConfig> },
}

impl TransformConfig {
    pub fn build(self) -> Result<Box<dyn Transform>> {
        let transform: Box<dyn Transform> = match self {
            Self::ToAbsoluteCoords => Box::new(ToAbsoluteCoords),
            Self::ToPercentCoords => Box::new(ToPercentCoords),
            Self::Resize(init) => Box::new(init.build()?),
            Self::SubtractMeans(init) => Box::new(init.build()?),
            Self::Expand(init) => Box::new(init.build()?),
            Self::RandomMirror(init) => Box::new(init.build()?),
            Self::RandomSampleCrop(init) => Box::new(init.build()?),
            Self::RandomContrast(init) => Box::new(init.build()?),
            Self::RandomBrightness(init) => Box::new(init.build()?),
            Self::RandomSaturation(init) => Box::new(init.build()?),
            Self::RandomHue(init) => Box::new(init.build()?),
            Self::RandomLightingNoise(init) => Box::new(init.build()?),
            Self::PhotometricDistort(init) => Box::new(init.build()?),
            Self::SwapChannels { order } => Box::new(SwapChannels::new(order)?),
            Self::ConvertColor { from, to } => Box::new(ConvertColor::new(from, to)?),
            Self::Compose { transforms } => {
                Box::new(PipelineConfig::Custom { transforms }.build()?)
            }
        };
        Ok(transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AugmentError;

    #[test]
    fn parse_custom_pipeline() -> Result<()> {
        let config = Config::from_json5(
            r#"{
                pipeline: {
                    kind: "Custom",
                    transforms: [
                        { type: "ToAbsoluteCoords" },
                        { type: "RandomMirror", prob: 0.25 },
                        { type: "ConvertColor", from: "BGR", to: "HSV" },
                        { type: "Compose", transforms: [{ type: "ToPercentCoords" }] },
                    ],
                },
            }"#,
        )?;
        let pipeline = config.build()?;
        assert_eq!(pipeline.len(), 4);
        let names: Vec<_> = pipeline.transforms().iter().map(|step| step.name()).collect();
        assert_eq!(
            names,
            vec!["ToAbsoluteCoords", "RandomMirror", "ConvertColor", "Compose"]
        );
        Ok(())
    }

    #[test]
    fn invalid_transform_reports_index() {
        let config = Config::from_json5(
            r#"{
                pipeline: {
                    kind: "Custom",
                    transforms: [
                        { type: "ToAbsoluteCoords" },
                        { type: "RandomBrightness", delta: 300 },
                    ],
                },
            }"#,
        )
        .unwrap();
        let err = config.build().unwrap_err();
        assert!(format!("{:#}", err).contains("invalid transform at index 1"));
        assert!(matches!(
            err.downcast_ref::<AugmentError>(),
            Some(AugmentError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn unsupported_conversion_in_config() {
        let config = Config {
            pipeline: PipelineConfig::Custom {
                transforms: vec![TransformConfig::ConvertColor {
                    from: ColorSpace::Rgb,
                    to: ColorSpace::Rgb,
                }],
            },
        };
        let err = config.build().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AugmentError>(),
            Some(AugmentError::UnsupportedConversion { .. })
        ));
    }
}

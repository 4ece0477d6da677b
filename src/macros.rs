/// Implements the usual `der` traits for a newtype by delegating to the inner
/// type, so `SEQUENCE OF`-style extensions keep their own named Rust type
/// without re-stating the codec.
macro_rules! impl_newtype {
    ($newtype:ty, $inner:ty) => {
        impl From<$inner> for $newtype {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$newtype> for $inner {
            fn from(value: $newtype) -> Self {
                value.0
            }
        }

        impl AsRef<$inner> for $newtype {
            fn as_ref(&self) -> &$inner {
                &self.0
            }
        }

        impl<'a> ::der::DecodeValue<'a> for $newtype {
            fn decode_value<R: ::der::Reader<'a>>(
                reader: &mut R,
                header: ::der::Header,
            ) -> ::der::Result<Self> {
                Ok(Self(<$inner as ::der::DecodeValue>::decode_value(reader, header)?))
            }
        }

        impl ::der::EncodeValue for $newtype {
            fn value_len(&self) -> ::der::Result<::der::Length> {
                self.0.value_len()
            }

            fn encode_value(&self, writer: &mut impl ::der::Writer) -> ::der::Result<()> {
                self.0.encode_value(writer)
            }
        }

        impl ::der::FixedTag for $newtype {
            const TAG: ::der::Tag = <$inner as ::der::FixedTag>::TAG;
        }
    };
}

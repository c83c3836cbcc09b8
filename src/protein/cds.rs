use crate::fasta::BaseSource;
use crate::models::{Sequence, Transcript};
use crate::utils::errors::FastaError;

/// Assembles the spliced coding sequence of a transcript
///
/// The exons are visited in transcript orientation and clipped to the coding
/// region. If the coding sequence enters its first exon with a split codon
/// (see [`Exon::codon_offset`](`crate::models::Exon::codon_offset`)), the
/// incomplete codon is skipped so that the result starts in frame.
///
/// The result is the sense strand sequence and includes the stop codon.
/// Non-coding transcripts return `Ok(None)`.
///
/// # Examples
///
/// ```rust
/// use txannot::models::Strand;
/// use txannot::protein::coding_sequence;
/// use txannot::tests::catalogs::{coding_reference, coding_transcript};
///
/// let reference = coding_reference();
/// let cds = coding_sequence(&coding_transcript(Strand::Plus), &reference)
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(cds.len(), 201);
/// assert!(cds.to_string().starts_with("ATG"));
/// assert!(cds.to_string().ends_with("TAA"));
/// ```
pub fn coding_sequence<S: BaseSource + ?Sized>(
    transcript: &Transcript,
    source: &S,
) -> Result<Option<Sequence>, FastaError> {
    let (coding_start, coding_end) = match transcript.coding_region() {
        Some(region) => region,
        None => return Ok(None),
    };
    let strand = transcript.strand();

    let mut seq = Sequence::with_capacity((coding_end - coding_start + 1) as usize);
    let mut first_exon = true;
    for exon in strand.exons_5_to_3(transcript.exons()) {
        if strand.precedes(exon, coding_start, coding_end) {
            continue;
        }
        if strand.follows(exon, coding_start, coding_end) {
            break;
        }
        let mut start = exon.start().max(coding_start);
        let mut end = exon.end().min(coding_end);
        if first_exon {
            let offset = exon.codon_offset(&strand, strand.five_prime(start, end));
            (start, end) = strand.trim_five_prime(start, end, offset);
            first_exon = false;
        }
        strand.extend_5_to_3(&mut seq, source.bases(transcript.chrom(), start, end)?);
    }
    strand.to_sense(&mut seq);
    Ok(Some(seq))
}

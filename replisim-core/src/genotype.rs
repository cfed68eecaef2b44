use std::ops::Range;

use crate::Error;
use crate::LocusId;
use crate::Sex;

pub type Allele = u8;

/// Ploidy and the number of loci on each chromosome.
///
/// Loci are indexed globally: the loci of chromosome 0 come first,
/// followed by those of chromosome 1, etc.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenoStructure {
    ploidy: usize,
    loci_per_chromosome: Vec<usize>,
    chromosome_begin: Vec<usize>,
}

impl GenoStructure {
    /// # Examples
    ///
    /// ```
    /// # use replisim_core::GenoStructure;
    /// let s = GenoStructure::new(2, &[2, 3]).unwrap();
    /// assert_eq!(s.total_loci(), 5);
    /// assert_eq!(s.chromosome_range(1), Some(2..5));
    /// assert!(GenoStructure::new(3, &[1]).is_err());
    /// assert!(GenoStructure::new(2, &[1, 0]).is_err());
    /// ```
    pub fn new(ploidy: usize, loci_per_chromosome: &[usize]) -> Result<Self, Error> {
        if ploidy != 1 && ploidy != 2 {
            return Err(Error::InvalidPloidy(ploidy));
        }
        let mut chromosome_begin = Vec::with_capacity(loci_per_chromosome.len() + 1);
        let mut total = 0;
        for (ch, &n) in loci_per_chromosome.iter().enumerate() {
            if n == 0 {
                return Err(Error::EmptyChromosome(ch));
            }
            chromosome_begin.push(total);
            total += n;
        }
        chromosome_begin.push(total);
        Ok(Self {
            ploidy,
            loci_per_chromosome: loci_per_chromosome.to_vec(),
            chromosome_begin,
        })
    }

    pub fn ploidy(&self) -> usize {
        self.ploidy
    }

    pub fn num_chromosomes(&self) -> usize {
        self.loci_per_chromosome.len()
    }

    pub fn loci_per_chromosome(&self) -> &[usize] {
        &self.loci_per_chromosome
    }

    pub fn total_loci(&self) -> usize {
        self.chromosome_begin.last().copied().unwrap_or(0)
    }

    /// Global locus indexes of a chromosome.
    pub fn chromosome_range(&self, chromosome: usize) -> Option<Range<usize>> {
        if chromosome < self.num_chromosomes() {
            Some(self.chromosome_begin[chromosome]..self.chromosome_begin[chromosome + 1])
        } else {
            None
        }
    }

    /// Global id of the `index`-th locus on `chromosome`.
    pub fn locus(&self, chromosome: usize, index: usize) -> Option<LocusId> {
        let range = self.chromosome_range(chromosome)?;
        if index < range.len() {
            Some(LocusId::from(range.start + index))
        } else {
            None
        }
    }

    pub fn contains(&self, locus: LocusId) -> bool {
        locus < self.total_loci()
    }

    /// Length of a genotype vector.
    pub fn genotype_len(&self) -> usize {
        self.ploidy * self.total_loci()
    }
}

/// A single individual.
///
/// The genotype is stored copy-major: allele `p` at locus `l`
/// is at `p * total_loci + l`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Individual {
    genotype: Vec<Allele>,
    total_loci: usize,
    sex: Sex,
}

impl Individual {
    pub fn new(structure: &GenoStructure) -> Self {
        Self {
            genotype: vec![0; structure.genotype_len()],
            total_loci: structure.total_loci(),
            sex: Sex::default(),
        }
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = sex;
    }

    pub fn ploidy(&self) -> usize {
        if self.total_loci == 0 {
            0
        } else {
            self.genotype.len() / self.total_loci
        }
    }

    /// # Panics
    ///
    /// If `copy` or `locus` are out of range.
    pub fn allele(&self, copy: usize, locus: LocusId) -> Allele {
        self.genotype[self.offset(copy, locus)]
    }

    /// # Panics
    ///
    /// If `copy` or `locus` are out of range.
    pub fn set_allele(&mut self, copy: usize, locus: LocusId, allele: Allele) {
        let offset = self.offset(copy, locus);
        self.genotype[offset] = allele;
    }

    /// All loci of one homologous copy.
    pub fn copy(&self, copy: usize) -> &[Allele] {
        &self.genotype[copy * self.total_loci..(copy + 1) * self.total_loci]
    }

    pub fn copy_mut(&mut self, copy: usize) -> &mut [Allele] {
        &mut self.genotype[copy * self.total_loci..(copy + 1) * self.total_loci]
    }

    pub fn genotype(&self) -> &[Allele] {
        &self.genotype
    }

    fn offset(&self, copy: usize, locus: LocusId) -> usize {
        assert!(locus < self.total_loci, "locus {} out of range", locus);
        copy * self.total_loci + locus.as_usize()
    }
}
